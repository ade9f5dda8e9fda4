#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/*
Parameter Bundles
=================

One explicit struct per voice type, validated before any voice exists.
The rules follow two different philosophies on purpose:

  reject   anything that would break an invariant: non-positive frequency
           or duration, damping outside [0, 1) - a damping factor of 1.0
           would make the string loop gain unity and the note would never
           decay, so it is refused, never clamped.

  clamp    pure taste parameters where any value is safe: gains and
           excitation strengths are clamped into [0, 1] at voice build
           time.

Every noise-consuming bundle carries an explicit seed so a triggered voice
is reproducible sample-for-sample.
*/

fn require_positive(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        });
    }
    Ok(())
}

fn require_finite(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}

/// How a plucked string synthesizes its note.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluckMode {
    /// Persistent delay → filter → feedback-gain loop, excited by a noise
    /// burst at trigger time.
    Feedback,
    /// The whole note is rendered up front into a buffer, then played back
    /// through a single gain envelope.
    Sampled,
}

/// Optional detuned-unison layer: N strings spread across ±`detune_cents`,
/// plus a short hammer-strike transient at onset.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ensemble {
    pub strings: usize,
    pub detune_cents: f32,
}

impl Default for Ensemble {
    fn default() -> Self {
        Self {
            strings: 3,
            detune_cents: 6.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckParams {
    pub frequency_hz: f32,
    /// Strength of the noise excitation, clamped to [0, 1].
    pub excitation: f32,
    /// Per-step loop attenuation. Must lie in [0, 1); 1.0 or above would
    /// sustain forever and is rejected.
    pub damping: f32,
    /// Cutoff of the low-pass inside the feedback loop.
    pub brightness_hz: f32,
    /// Scheduled note length; the feedback and output gains both reach the
    /// floor by this time regardless of damping.
    pub sustain_secs: f32,
    pub seed: u64,
    pub mode: PluckMode,
    pub ensemble: Option<Ensemble>,
}

impl Default for PluckParams {
    fn default() -> Self {
        Self {
            frequency_hz: 220.0,
            excitation: 0.8,
            damping: 0.996,
            brightness_hz: 5_000.0,
            sustain_secs: 2.0,
            seed: 0x5EED_F00D,
            mode: PluckMode::Feedback,
            ensemble: None,
        }
    }
}

impl PluckParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("frequency_hz", self.frequency_hz)?;
        require_positive("brightness_hz", self.brightness_hz)?;
        require_positive("sustain_secs", self.sustain_secs)?;
        require_finite("excitation", self.excitation)?;

        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "damping",
                value: self.damping,
                reason: "must be finite and non-negative",
            });
        }
        if self.damping >= 1.0 {
            return Err(EngineError::InvalidParameter {
                name: "damping",
                value: self.damping,
                reason: "loop gain must stay below 1 or the note never decays",
            });
        }

        if let Some(ensemble) = &self.ensemble {
            if ensemble.strings == 0 {
                return Err(EngineError::InvalidParameter {
                    name: "ensemble.strings",
                    value: 0.0,
                    reason: "an ensemble needs at least one string",
                });
            }
            require_finite("ensemble.detune_cents", ensemble.detune_cents)?;
        }

        Ok(())
    }

    pub fn duration_secs(&self) -> f32 {
        self.sustain_secs
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickParams {
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_secs: f32,
}

impl Default for KickParams {
    fn default() -> Self {
        Self {
            start_hz: 150.0,
            end_hz: 40.0,
            duration_secs: 0.5,
        }
    }
}

impl KickParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("start_hz", self.start_hz)?;
        require_positive("end_hz", self.end_hz)?;
        require_positive("duration_secs", self.duration_secs)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnareParams {
    pub noise_gain: f32,
    pub tone_gain: f32,
    pub duration_secs: f32,
    pub seed: u64,
}

impl Default for SnareParams {
    fn default() -> Self {
        Self {
            noise_gain: 1.0,
            tone_gain: 0.6,
            duration_secs: 0.25,
            seed: 0x5EED_F00D,
        }
    }
}

impl SnareParams {
    pub fn validate(&self) -> Result<()> {
        require_finite("noise_gain", self.noise_gain)?;
        require_finite("tone_gain", self.tone_gain)?;
        require_positive("duration_secs", self.duration_secs)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HihatParams {
    /// Open vs closed is nothing but this number: ~50 ms closed, ~300 ms open.
    pub decay_secs: f32,
    pub cutoff_hz: f32,
    pub seed: u64,
}

impl Default for HihatParams {
    fn default() -> Self {
        Self {
            decay_secs: 0.05,
            cutoff_hz: 7_000.0,
            seed: 0x5EED_F00D,
        }
    }
}

impl HihatParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("decay_secs", self.decay_secs)?;
        require_positive("cutoff_hz", self.cutoff_hz)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TomParams {
    /// High/low tom is nothing but this number.
    pub pitch_hz: f32,
    pub duration_secs: f32,
}

impl Default for TomParams {
    fn default() -> Self {
        Self {
            pitch_hz: 180.0,
            duration_secs: 0.3,
        }
    }
}

impl TomParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("pitch_hz", self.pitch_hz)?;
        require_positive("duration_secs", self.duration_secs)
    }
}

/// Trigger parameters for the percussive voice bank.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercussionParams {
    Kick(KickParams),
    Snare(SnareParams),
    Hihat(HihatParams),
    Tom(TomParams),
}

impl PercussionParams {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Kick(p) => p.validate(),
            Self::Snare(p) => p.validate(),
            Self::Hihat(p) => p.validate(),
            Self::Tom(p) => p.validate(),
        }
    }

    pub fn duration_secs(&self) -> f32 {
        match self {
            Self::Kick(p) => p.duration_secs,
            Self::Snare(p) => p.duration_secs,
            Self::Hihat(p) => p.decay_secs,
            Self::Tom(p) => p.duration_secs,
        }
    }
}
