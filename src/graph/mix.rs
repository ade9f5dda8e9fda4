use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Weighted parallel sum of two sources.
///
/// Each source carries its own gain rather than a crossfade balance, because
/// the voices that need mixing (snare body + rattle, detuned string pairs)
/// specify independent levels, not a dry/wet blend.
pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    gain_a: f32,
    gain_b: f32,
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, gain_a: f32, gain_b: f32) -> Self {
        Self {
            source_a,
            source_b,
            gain_a,
            gain_b,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.source_b.render_block(frames, ctx);

        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o = (*o * self.gain_a) + (*b * self.gain_b);
        }
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        self.source_a.trigger(ctx);
        self.source_b.trigger(ctx);
    }

    fn is_active(&self) -> bool {
        self.source_a.is_active() || self.source_b.is_active()
    }
}
