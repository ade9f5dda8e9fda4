//! Hi-hat voice.
//!
//! Noise through a high-pass into a band-pass: the high-pass strips the low
//! end, the resonant band-pass adds the metallic ring. The envelope is a
//! very short exponential - open and closed hats are the same code with a
//! different decay time.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode};
use crate::voices::params::HihatParams;

/// Build a hi-hat voice. Parameters are assumed validated.
pub fn hihat(params: &HihatParams, sample_rate: f32) -> impl crate::graph::GraphNode {
    let burst_len = (params.decay_secs * sample_rate) as usize;

    NoiseNode::burst(params.seed, burst_len, 1.0)
        .through(FilterNode::highpass(params.cutoff_hz))
        .through(FilterNode::bandpass(params.cutoff_hz * 1.4).with_resonance(0.3))
        .amplify(EnvNode::decay(1.0, params.decay_secs, sample_rate))
}
