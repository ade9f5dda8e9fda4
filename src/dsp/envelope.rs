use crate::{GAIN_FLOOR, MIN_TIME};

/*
Scheduled Gain Envelope
=======================

A time-varying amplitude multiplier built from an explicit schedule of ramp
segments, appended at construction time on the control path:

  hold(secs)           keep the current level
  linear_to(target)    straight line to target over the segment
  exp_to(target)       constant-ratio curve to target over the segment

Exponential ramps model how struck and plucked sounds actually lose energy,
but a constant-ratio curve can never reach zero: every exponential target is
clamped to GAIN_FLOOR, and a voice's scheduled lifetime decides when the
remaining inaudible tail is cut.

Per sample the envelope applies one precomputed step (an increment for
linear, a ratio for exponential), so the realtime path does no divisions and
no allocation. Segment boundaries land exactly on the target, which keeps
back-to-back ramps click-free.
*/

#[derive(Clone, Copy, Debug)]
enum Shape {
    Hold,
    Linear,
    Exponential,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    target: f32,
    samples: u32,
    shape: Shape,
}

const MAX_SEGMENTS: usize = 8;

pub struct GainEnvelope {
    segments: [Segment; MAX_SEGMENTS],
    count: usize,

    index: usize,
    elapsed: u32,
    level: f32,
    initial_level: f32,
    /// Per-sample increment (linear) or ratio (exponential) of the running
    /// segment, recomputed at each segment entry.
    step: f32,
}

impl GainEnvelope {
    /// An envelope resting at `level` with no scheduled segments.
    pub fn at(level: f32) -> Self {
        Self {
            segments: [Segment {
                target: 0.0,
                samples: 0,
                shape: Shape::Hold,
            }; MAX_SEGMENTS],
            count: 0,
            index: 0,
            elapsed: 0,
            level,
            initial_level: level,
            step: 0.0,
        }
    }

    /// The common percussive shape: start at `peak`, decay exponentially to
    /// the floor over `secs`.
    pub fn decay(peak: f32, secs: f32, sample_rate: f32) -> Self {
        Self::at(peak).exp_to(GAIN_FLOOR, secs, sample_rate)
    }

    pub fn hold(self, secs: f32, sample_rate: f32) -> Self {
        self.push(Segment {
            target: 0.0,
            samples: seconds_to_samples(secs, sample_rate),
            shape: Shape::Hold,
        })
    }

    pub fn linear_to(self, target: f32, secs: f32, sample_rate: f32) -> Self {
        self.push(Segment {
            target,
            samples: seconds_to_samples(secs, sample_rate),
            shape: Shape::Linear,
        })
    }

    /// Exponential ramp; `target` is clamped to `GAIN_FLOOR`.
    pub fn exp_to(self, target: f32, secs: f32, sample_rate: f32) -> Self {
        self.push(Segment {
            target: target.max(GAIN_FLOOR),
            samples: seconds_to_samples(secs, sample_rate),
            shape: Shape::Exponential,
        })
    }

    fn push(mut self, segment: Segment) -> Self {
        assert!(self.count < MAX_SEGMENTS, "envelope schedule overflow");
        self.segments[self.count] = segment;
        self.count += 1;
        self
    }

    fn begin_segment(&mut self, segment: Segment) {
        self.step = match segment.shape {
            Shape::Hold => 0.0,
            Shape::Linear => (segment.target - self.level) / segment.samples as f32,
            Shape::Exponential => {
                // An exponential cannot depart from zero; snap to the floor.
                self.level = self.level.max(GAIN_FLOOR);
                (segment.target / self.level).powf(1.0 / segment.samples as f32)
            }
        };
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.index >= self.count {
            return self.level;
        }

        let segment = self.segments[self.index];
        if self.elapsed == 0 {
            self.begin_segment(segment);
        }

        match segment.shape {
            Shape::Hold => {}
            Shape::Linear => self.level += self.step,
            Shape::Exponential => self.level *= self.step,
        }

        self.elapsed += 1;
        if self.elapsed >= segment.samples {
            // Land exactly on the target so chained segments stay click-free.
            if !matches!(segment.shape, Shape::Hold) {
                self.level = segment.target;
            }
            self.index += 1;
            self.elapsed = 0;
        }

        self.level
    }

    /// Write envelope values into the buffer, one per sample.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// True once every scheduled segment has been consumed.
    pub fn is_finished(&self) -> bool {
        self.index >= self.count
    }

    /// Rewind the schedule to its starting level.
    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = 0;
        self.level = self.initial_level;
        self.step = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}

fn seconds_to_samples(secs: f32, sample_rate: f32) -> u32 {
    (secs.max(MIN_TIME) * sample_rate).round().max(1.0) as u32
}
