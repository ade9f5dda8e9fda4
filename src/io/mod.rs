//! Audio backend glue: drives the engine from a cpal output stream.

pub mod output;
