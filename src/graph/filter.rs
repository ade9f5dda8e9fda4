use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, RenderCtx},
};

/// Filter node for in-line frequency shaping (used with `.through()`).
pub struct FilterNode {
    filter: SVFilter,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff_hz),
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
        }
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::bandpass(cutoff_hz),
        }
    }

    pub fn allpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::allpass(cutoff_hz),
        }
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.filter.set_resonance(resonance);
        self
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx.sample_rate);
    }
}
