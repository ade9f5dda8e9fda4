//! Plucked-string voice: delay-line feedback synthesis.
//!
//! The string is a loop - delay line → damper → feedback gain → delay line -
//! seeded with a burst of noise. Each trip around the loop the two-tap
//! average bleeds off high frequencies the way a real string sheds its upper
//! harmonics, and the damping factor keeps total loop gain strictly below
//! one so the note always decays.
//!
//! The voice decays along two *independent* paths, both deliberate:
//!
//!   1. the per-step damping factor (the musical decay), and
//!   2. a scheduled exponential feedback-gain ramp to the floor by
//!      `sustain_secs` (a hard lifetime bound that holds even for damping
//!      values within a hair of 1).
//!
//! The output gain fades on the same schedule, so the tap a listener hears
//! is bounded too.

use crate::dsp::{DelayLine, GainEnvelope, NoiseBurst, OnePoleLowpass};
use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode, GraphNode,
    RenderCtx,
};
use crate::voices::params::{Ensemble, PluckMode, PluckParams};
use crate::voices::sampled::SampledPluck;
use crate::{GAIN_FLOOR, MAX_BLOCK_SIZE};

/// One string, feedback-loop model.
pub struct PluckVoice {
    delay: DelayLine,
    damping: f32,
    brightness: OnePoleLowpass,
    excitation: NoiseBurst,
    feedback_env: GainEnvelope,
    output_env: GainEnvelope,
}

impl PluckVoice {
    /// Parameters are assumed validated; gains are clamped here.
    pub fn new(params: &PluckParams, sample_rate: f32) -> Self {
        let delay = DelayLine::for_frequency(sample_rate, params.frequency_hz);
        // One period of noise is enough to energize every mode of the loop.
        let burst_len = delay.len();

        Self {
            damping: params.damping,
            brightness: OnePoleLowpass::new(params.brightness_hz, sample_rate),
            excitation: NoiseBurst::new(params.seed, burst_len, params.excitation.clamp(0.0, 1.0)),
            feedback_env: GainEnvelope::at(1.0).exp_to(GAIN_FLOOR, params.sustain_secs, sample_rate),
            output_env: GainEnvelope::at(1.0).exp_to(GAIN_FLOOR, params.sustain_secs, sample_rate),
            delay,
        }
    }
}

impl GraphNode for PluckVoice {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let len = self.delay.len();

        for sample in out.iter_mut() {
            let s1 = self.delay.read(len);
            let s2 = self.delay.read(len - 1);

            let averaged = (s1 + s2) * 0.5 * self.damping;
            let shaped = self.brightness.next_sample(averaged);

            let next = shaped * self.feedback_env.next_sample() + self.excitation.next_sample();
            self.delay.write(next);

            *sample = s1 * self.output_env.next_sample();
        }
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        self.delay.reset();
        self.brightness.reset();
        self.excitation.reset();
        self.feedback_env.reset();
        self.output_env.reset();
    }

    fn is_active(&self) -> bool {
        !self.output_env.is_finished()
    }
}

/// Detuned unison: N strings spread across ±`detune_cents`, each with its
/// own damping and brightness jitter, plus a hammer-strike transient layered
/// at onset. Models the multiple physical strings behind one piano note.
pub struct EnsemblePluck {
    strings: Vec<(PluckVoice, f32)>,
    hammer: Box<dyn GraphNode>,
    temp_buffer: Vec<f32>,
}

impl EnsemblePluck {
    pub fn new(params: &PluckParams, ensemble: &Ensemble, sample_rate: f32) -> Self {
        let strings = string_variants(params, ensemble)
            .into_iter()
            .map(|(string_params, gain)| (PluckVoice::new(&string_params, sample_rate), gain))
            .collect();

        Self {
            strings,
            hammer: hammer_strike(params, sample_rate),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl GraphNode for EnsemblePluck {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);
        let frames = &mut self.temp_buffer[..out.len()];

        for (string, gain) in &mut self.strings {
            frames.fill(0.0);
            string.render_block(frames, ctx);
            for (o, s) in out.iter_mut().zip(frames.iter()) {
                *o += *s * *gain;
            }
        }

        frames.fill(0.0);
        self.hammer.render_block(frames, ctx);
        for (o, s) in out.iter_mut().zip(frames.iter()) {
            *o += *s;
        }
    }

    fn trigger(&mut self, ctx: &RenderCtx) {
        for (string, _) in &mut self.strings {
            string.trigger(ctx);
        }
        self.hammer.trigger(ctx);
    }

    fn is_active(&self) -> bool {
        self.strings.iter().any(|(s, _)| s.is_active()) || self.hammer.is_active()
    }
}

/// Per-string parameter variants for ensemble mode, shared by the feedback
/// and precomputed models. Gains are normalized so unison stays at roughly
/// the level of a single string; the spread stands in for stereo placement
/// in a mono graph.
pub(crate) fn string_variants(
    params: &PluckParams,
    ensemble: &Ensemble,
) -> Vec<(PluckParams, f32)> {
    let n = ensemble.strings;
    let mut variants = Vec::with_capacity(n);

    for i in 0..n {
        // Symmetric placement across [-1, 1].
        let t = if n == 1 {
            0.0
        } else {
            i as f32 / (n - 1) as f32 * 2.0 - 1.0
        };

        let cents = ensemble.detune_cents * t;
        let variant = PluckParams {
            frequency_hz: params.frequency_hz * 2.0_f32.powf(cents / 1200.0),
            damping: params.damping * (1.0 - 0.0008 * t.abs()),
            brightness_hz: params.brightness_hz * (1.0 + 0.05 * t),
            seed: params.seed.wrapping_add(i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
            ..*params
        };
        let gain = if t == 0.0 { 1.0 } else { 0.75 };
        variants.push((variant, gain));
    }

    let total: f32 = variants.iter().map(|(_, g)| *g).sum();
    for (_, gain) in &mut variants {
        *gain /= total;
    }

    variants
}

/// Short broadband transient layered at note onset: the hammer hitting the
/// strings before they ring.
pub(crate) fn hammer_strike(params: &PluckParams, sample_rate: f32) -> Box<dyn GraphNode> {
    let len = (0.005 * sample_rate) as usize;
    let strike = NoiseNode::burst(
        params.seed ^ 0xA55A_C3D2_1B4F_8E67,
        len,
        params.excitation.clamp(0.0, 1.0) * 0.4,
    )
    .through(FilterNode::bandpass(3_000.0))
    .amplify(EnvNode::decay(1.0, 0.012, sample_rate));
    Box::new(strike)
}

/// Build a plucked-string voice for validated parameters.
pub fn pluck(params: &PluckParams, sample_rate: f32) -> Box<dyn GraphNode> {
    match (params.mode, &params.ensemble) {
        (PluckMode::Sampled, _) => Box::new(SampledPluck::new(params, sample_rate)),
        (PluckMode::Feedback, Some(ensemble)) => {
            Box::new(EnsemblePluck::new(params, ensemble, sample_rate))
        }
        (PluckMode::Feedback, None) => Box::new(PluckVoice::new(params, sample_rate)),
    }
}
