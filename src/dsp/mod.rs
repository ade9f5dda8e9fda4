//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so graph combinators can layer on orchestration.

/// Fixed-length circular delay line, the substrate of the string model.
pub mod delay;
/// Scheduled linear/exponential gain ramps.
pub mod envelope;
/// State-variable filter and one-pole loop damper.
pub mod filter;
/// Seeded, deterministic noise source and burst.
pub mod noise;

pub use delay::DelayLine;
pub use envelope::GainEnvelope;
pub use filter::{OnePoleLowpass, SVFilter};
pub use noise::{NoiseBurst, NoiseSource};
