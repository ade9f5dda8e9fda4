use crate::graph::node::{GraphNode, RenderCtx};

/// Serial chain: the source renders into the buffer, then the processor
/// transforms it in place. The fundamental shape of every percussive chain
/// here (generator → filter → filter …).
pub struct Through<S, F> {
    source: S,
    processor: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, processor: F) -> Self {
        Self { source, processor }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.processor.render_block(out, ctx);
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        self.source.trigger(ctx);
        self.processor.trigger(ctx);
    }

    /// Processors transform what flows through them; only the source decides
    /// whether anything still flows.
    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
