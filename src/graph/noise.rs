use crate::{
    dsp::noise::NoiseBurst,
    graph::node::{GraphNode, RenderCtx},
};

/// Seeded noise-burst source.
///
/// Renders `len` samples of white noise at the given amplitude, then
/// silence. Every percussive transient and string excitation starts life
/// here, so the seed fully determines a voice's sample sequence.
pub struct NoiseNode {
    burst: NoiseBurst,
}

impl NoiseNode {
    pub fn burst(seed: u64, len: usize, amplitude: f32) -> Self {
        Self {
            burst: NoiseBurst::new(seed, len, amplitude),
        }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self.burst.next_sample();
        }
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        self.burst.reset();
    }

    fn is_active(&self) -> bool {
        !self.burst.is_finished()
    }
}
