//! Precomputed plucked-string voice.
//!
//! The second construction strategy for the string model: run the whole
//! delay-line step loop up front into a fixed-length buffer, then play the
//! buffer back through one gain envelope. No realtime feedback state, a
//! lifetime that is bounded by construction, and - because the excitation
//! is seeded - a sample sequence that is bit-identical across runs.

use crate::dsp::{DelayLine, GainEnvelope, NoiseSource, OnePoleLowpass};
use crate::graph::{GraphNode, RenderCtx};
use crate::voices::params::PluckParams;
use crate::voices::pluck::string_variants;
use crate::GAIN_FLOOR;

pub struct SampledPluck {
    buffer: Vec<f32>,
    position: usize,
    output_env: GainEnvelope,
}

impl SampledPluck {
    pub fn new(params: &PluckParams, sample_rate: f32) -> Self {
        let buffer = match &params.ensemble {
            Some(ensemble) => {
                let mut mixed = Vec::new();
                for (variant, gain) in string_variants(params, ensemble) {
                    let rendered = render_string(&variant, sample_rate);
                    if mixed.len() < rendered.len() {
                        mixed.resize(rendered.len(), 0.0);
                    }
                    for (m, s) in mixed.iter_mut().zip(rendered.iter()) {
                        *m += *s * gain;
                    }
                }

                // The hammer transient is precomputed and layered at onset,
                // same as the feedback model does live.
                let mut hammer = crate::voices::pluck::hammer_strike(params, sample_rate);
                let mut strike = vec![0.0; ((0.02 * sample_rate) as usize).min(mixed.len())];
                hammer.render_block(&mut strike, &RenderCtx::new(sample_rate));
                for (m, s) in mixed.iter_mut().zip(strike.iter()) {
                    *m += *s;
                }

                mixed
            }
            None => render_string(params, sample_rate),
        };

        Self {
            buffer,
            position: 0,
            output_env: GainEnvelope::at(1.0).exp_to(GAIN_FLOOR, params.sustain_secs, sample_rate),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// The pure model: pre-fill the line with seeded noise (the pluck), then
/// step delay → average → damp → write for the whole note. No excitation is
/// injected after initialization.
fn render_string(params: &PluckParams, sample_rate: f32) -> Vec<f32> {
    let mut delay = DelayLine::for_frequency(sample_rate, params.frequency_hz);
    let mut noise = NoiseSource::with_seed(params.seed);
    let excitation = params.excitation.clamp(0.0, 1.0);
    delay.fill_with(|| noise.next_sample() * excitation);

    let mut brightness = OnePoleLowpass::new(params.brightness_hz, sample_rate);
    let damping = params.damping;
    let len = delay.len();

    let total = (params.sustain_secs * sample_rate).ceil() as usize;
    let mut buffer = Vec::with_capacity(total);

    for _ in 0..total {
        let s1 = delay.read(len);
        let s2 = delay.read(len - 1);
        let next = brightness.next_sample((s1 + s2) * 0.5 * damping);
        delay.write(next);
        buffer.push(s1);
    }

    buffer
}

impl GraphNode for SampledPluck {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            let raw = self.buffer.get(self.position).copied().unwrap_or(0.0);
            *sample = raw * self.output_env.next_sample();
            self.position = self.position.saturating_add(1).min(self.buffer.len());
        }
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        self.position = 0;
        self.output_env.reset();
    }

    fn is_active(&self) -> bool {
        self.position < self.buffer.len()
    }
}
