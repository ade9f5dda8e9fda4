//! Snare drum voice.
//!
//! Band-passed noise for the wire rattle, summed with a short low triangle
//! body. Each leg has its own gain and envelope; the body dies faster than
//! the rattle, which is what reads as "snare" rather than "tom".

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode,
    oscillator::OscNode,
};
use crate::voices::params::SnareParams;

const RATTLE_HZ: f32 = 3_000.0;
const BODY_HZ: f32 = 185.0;

/// Build a snare voice. Parameters are assumed validated; gains clamp here.
pub fn snare(params: &SnareParams, sample_rate: f32) -> impl crate::graph::GraphNode {
    let duration = params.duration_secs;
    let burst_len = (duration * sample_rate) as usize;

    let rattle = NoiseNode::burst(params.seed, burst_len, 1.0)
        .through(FilterNode::bandpass(RATTLE_HZ).with_resonance(0.3))
        .amplify(EnvNode::decay(
            params.noise_gain.clamp(0.0, 1.0),
            duration,
            sample_rate,
        ));

    let body = OscNode::triangle(BODY_HZ).amplify(EnvNode::decay(
        params.tone_gain.clamp(0.0, 1.0),
        duration * 0.5,
        sample_rate,
    ));

    body.mix(rattle, 1.0, 1.0)
}
