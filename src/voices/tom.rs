//! Tom drum voice.
//!
//! A pitched sine body with an exponential decay. High versus low tom is
//! purely the pitch parameter.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};
use crate::voices::params::TomParams;

/// Build a tom voice. Parameters are assumed validated.
pub fn tom(params: &TomParams, sample_rate: f32) -> impl crate::graph::GraphNode {
    OscNode::sine(params.pitch_hz)
        .amplify(EnvNode::decay(1.0, params.duration_secs, sample_rate))
        .through(FilterNode::lowpass(params.pitch_hz * 3.0))
}
