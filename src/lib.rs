pub mod analysis; // Spectrum helpers for analysis-sink consumers
pub mod dsp;
pub mod error;
pub mod graph; // Composable audio graph nodes
#[cfg(feature = "rtrb")]
pub mod io;
#[cfg(feature = "rtrb")]
pub mod synth; // Engine, sinks, voice lifecycle
pub mod voices;

pub use error::EngineError;
#[cfg(feature = "rtrb")]
pub use synth::engine::{EngineConfig, EngineHandle, PlectraEngine};
#[cfg(feature = "rtrb")]
pub use synth::voice::VoiceHandle;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Smallest level an exponential gain ramp may target. Ramping an exponential
/// toward exactly zero is undefined, so every decay lands here instead.
pub const GAIN_FLOOR: f32 = 1e-4;

/// Pitch clamp for delay-length derivation. Below this the delay line would
/// exceed its fixed ceiling; above the upper bound the loop degenerates.
pub const MIN_FREQUENCY_HZ: f32 = 20.0;
pub const MAX_FREQUENCY_HZ: f32 = 10_000.0;

pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
