//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what voice design
//! needs: block-based rendering, trigger events, and fluent combinators so
//! chains read the way the signal flows.

/// Multiply a signal by a modulator (envelope shaping).
pub mod amplify;
/// Envelope generator node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, `.mix()`).
pub mod extensions;
/// State-variable filter node.
pub mod filter;
/// Weighted parallel sum of two sources.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Seeded noise-burst source node.
pub mod noise;
/// Sine/triangle tone node with exponential pitch sweep.
pub mod oscillator;
/// Serial chaining of two nodes (source → processor).
pub mod through;

pub use node::{GraphNode, RenderCtx};
