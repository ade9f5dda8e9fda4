/// Context passed to graph nodes during rendering.
///
/// Voices are fully parameterized at construction, so the context carries
/// only what cannot be known until render time: the rate of the clock that
/// is pulling samples.
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for audio processing graph nodes.
///
/// A node renders blocks of samples and may respond to the single trigger
/// event that starts its voice. There is no release event: every voice in
/// this engine is one-shot, with a lifetime fixed at trigger time.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Fired once when the owning voice is triggered.
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn trigger(&mut self, _ctx: &RenderCtx) {}

    /// Whether this node may still contribute audible signal.
    ///
    /// Advisory: voice teardown is driven by scheduled expiry, not by this.
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        (**self).trigger(ctx)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
