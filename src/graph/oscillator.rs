use std::f32::consts::TAU;

use crate::graph::node::{GraphNode, RenderCtx};

/*
Tone Node
=========

The pitched generators the percussive voices are built from. Two waveforms
cover everything this engine needs:

  Sine      pure fundamental - kick and tom bodies
  Triangle  soft odd harmonics - snare body

Frequency is fixed at construction; drums are tuned by their parameters, not
by a note. A tone can carry an exponential pitch sweep (start → end over a
set time), which is the kick's defining gesture: the perceived "punch" is a
fast exponential drop from a high start pitch to the fundamental. The sweep
is multiplicative per sample, so the hot loop never calls `powf`.
*/

#[derive(Debug, Clone, Copy)]
enum Waveform {
    Sine,
    Triangle,
}

struct Sweep {
    end_hz: f32,
    secs: f32,
    remaining: Option<u64>, // derived from secs at first render
}

pub struct OscNode {
    waveform: Waveform,
    start_hz: f32,
    current_hz: f32,
    phase: f32,
    sweep: Option<Sweep>,
}

impl OscNode {
    pub fn sine(frequency_hz: f32) -> Self {
        Self::new(Waveform::Sine, frequency_hz)
    }

    pub fn triangle(frequency_hz: f32) -> Self {
        Self::new(Waveform::Triangle, frequency_hz)
    }

    fn new(waveform: Waveform, frequency_hz: f32) -> Self {
        Self {
            waveform,
            start_hz: frequency_hz,
            current_hz: frequency_hz,
            phase: 0.0,
            sweep: None,
        }
    }

    /// Sweep exponentially from the construction frequency to `end_hz`
    /// over `secs`, then hold `end_hz`.
    pub fn with_exp_sweep(mut self, end_hz: f32, secs: f32) -> Self {
        self.sweep = Some(Sweep {
            end_hz,
            secs,
            remaining: None,
        });
        self
    }

    pub fn frequency_hz(&self) -> f32 {
        self.current_hz
    }

    #[inline]
    fn waveform_sample(&self) -> f32 {
        match self.waveform {
            Waveform::Sine => (TAU * self.phase).sin(),
            // Rises -1→1 over the first half period, falls back over the second.
            Waveform::Triangle => 4.0 * (self.phase - (self.phase + 0.5).floor()).abs() - 1.0,
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        // Per-sample ratio that carries current_hz to end_hz over the sweep.
        let sweep_ratio = match &mut self.sweep {
            Some(sweep) => {
                let total = (sweep.secs * ctx.sample_rate).round().max(1.0) as u64;
                let remaining = *sweep.remaining.get_or_insert(total);
                if remaining > 0 {
                    Some((sweep.end_hz / self.current_hz).powf(1.0 / remaining as f32))
                } else {
                    None
                }
            }
            None => None,
        };

        for sample in out.iter_mut() {
            *sample = self.waveform_sample();

            self.phase += self.current_hz / ctx.sample_rate;
            self.phase -= self.phase.floor();

            if let (Some(ratio), Some(sweep)) = (sweep_ratio, &mut self.sweep) {
                if let Some(remaining) = &mut sweep.remaining {
                    if *remaining > 0 {
                        self.current_hz *= ratio;
                        *remaining -= 1;
                        if *remaining == 0 {
                            self.current_hz = sweep.end_hz;
                        }
                    }
                }
            }
        }
    }

    fn trigger(&mut self, _ctx: &RenderCtx) {
        self.phase = 0.0;
        self.current_hz = self.start_hz;
        if let Some(sweep) = &mut self.sweep {
            sweep.remaining = None;
        }
    }
}
