//! Voice construction: the plucked-string models and the percussive bank.
//!
//! Every voice is built on the control path from a validated parameter
//! bundle plus the engine's sample rate, and handed to the realtime path as
//! a boxed graph. Voices are one-shot: their whole lifetime is fixed by
//! their parameters at build time.

mod hihat;
mod kick;
pub mod params;
mod pluck;
mod sampled;
mod snare;
mod tom;

pub use hihat::hihat;
pub use kick::kick;
pub use pluck::{pluck, EnsemblePluck, PluckVoice};
pub use sampled::SampledPluck;
pub use snare::snare;
pub use tom::tom;

use crate::graph::GraphNode;
use params::PercussionParams;

/// Build a percussive voice for validated parameters.
pub fn percussive(params: &PercussionParams, sample_rate: f32) -> Box<dyn GraphNode> {
    match params {
        PercussionParams::Kick(p) => Box::new(kick(p, sample_rate)),
        PercussionParams::Snare(p) => Box::new(snare(p, sample_rate)),
        PercussionParams::Hihat(p) => Box::new(hihat(p, sample_rate)),
        PercussionParams::Tom(p) => Box::new(tom(p, sample_rate)),
    }
}
