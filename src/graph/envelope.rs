use crate::{
    dsp::envelope::GainEnvelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Envelope generator node.
///
/// Renders the scheduled gain curve as a signal, which `Amplify` multiplies
/// into the voice. The schedule is built on the control path; rendering
/// just steps the precomputed segments.
pub struct EnvNode {
    env: GainEnvelope,
}

impl EnvNode {
    pub fn new(env: GainEnvelope) -> Self {
        Self { env }
    }

    /// Exponential decay from `peak` to the gain floor over `secs`.
    pub fn decay(peak: f32, secs: f32, sample_rate: f32) -> Self {
        Self::new(GainEnvelope::decay(peak, secs, sample_rate))
    }

    pub fn level(&self) -> f32 {
        self.env.level()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.env.render(out);
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        self.env.reset();
    }

    fn is_active(&self) -> bool {
        !self.env.is_finished()
    }
}
