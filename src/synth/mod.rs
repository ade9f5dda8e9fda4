// Purpose: the engine proper - control/audio seam, sink fan-out, and the
// voice lifecycle ledger. This layer sits above graph nodes and owns every
// live voice from trigger to scheduled expiry.

pub mod engine;
pub mod message;
pub mod sink;
pub mod voice;
