//! Kick drum voice.
//!
//! A sine body whose pitch drops exponentially from a high start to the
//! fundamental over the first half of the note - the drop is the "punch" -
//! while the amplitude decays exponentially to near-silence by end of note.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};
use crate::voices::params::KickParams;

/// Build a kick voice. Parameters are assumed validated.
pub fn kick(params: &KickParams, sample_rate: f32) -> impl crate::graph::GraphNode {
    OscNode::sine(params.start_hz)
        .with_exp_sweep(params.end_hz, params.duration_secs * 0.5)
        .amplify(EnvNode::decay(1.0, params.duration_secs, sample_rate))
        // Keep the sweep smooth; everything above the start pitch is clatter.
        .through(FilterNode::lowpass(params.start_hz * 1.5))
}
