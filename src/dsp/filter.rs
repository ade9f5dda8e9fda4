use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type      | passes          | used by                                |
| --------- | --------------- | -------------------------------------- |
| low-pass  | below cutoff    | kick/tom smoothing, string brightness  |
| high-pass | above cutoff    | hi-hat (strip the low end)             |
| band-pass | around cutoff   | snare rattle, hi-hat ring, hammer      |
| all-pass  | all (phase only)| dispersion without amplitude change    |
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    AllPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub allpass: f32,
}

/// Topology-preserving state-variable filter.
///
/// One structure yields all four responses from the same two integrator
/// states, stays stable under cutoff changes, and costs a handful of
/// multiplies per sample.
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz)
    }

    pub fn allpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::AllPass, cutoff_hz)
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let wd = TAU * self.cutoff_hz;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            allpass: sample - 2.0 * k * v1,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.compute_g(sample_rate);
        let k = 2.0 - (2.0 * self.resonance);

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.filter_type {
                FilterType::LowPass => outputs.lowpass,
                FilterType::HighPass => outputs.highpass,
                FilterType::BandPass => outputs.bandpass,
                FilterType::AllPass => outputs.allpass,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance;
    }
}

/// One-pole low-pass used inside the string feedback loop.
///
/// The loop needs a damper whose gain never exceeds unity in any frequency
/// bin; a one-pole smoother has exactly that property and is cheap enough to
/// run once per delay-line step.
pub struct OnePoleLowpass {
    coeff: f32,
    state: f32,
}

impl OnePoleLowpass {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let cutoff = cutoff_hz.clamp(1.0, sample_rate * 0.49);
        Self {
            coeff: (-TAU * cutoff / sample_rate).exp(),
            state: 0.0,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        self.state = (1.0 - self.coeff) * sample + self.coeff * self.state;
        self.state
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (TAU * freq * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(64);
        buffer
            .get(skip..)
            .unwrap_or(buffer)
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 256];
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer[255] > 0.99);
    }

    #[test]
    fn highpass_rejects_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 256];
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer[255].abs() < 0.001);
    }

    #[test]
    fn lowpass_attenuates_above_cutoff() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = sine(5_000.0, 512);
        filter.render(&mut buffer, SAMPLE_RATE);

        let peak = peak_after_transient(&buffer);
        assert!(peak < 0.3, "expected attenuation, got peak {peak}");
    }

    #[test]
    fn bandpass_emphasizes_cutoff() {
        let mut filter = SVFilter::bandpass(1_000.0);
        filter.set_resonance(0.5);

        let mut on_center = sine(1_000.0, 1024);
        filter.render(&mut on_center, SAMPLE_RATE);
        let center_peak = peak_after_transient(&on_center);

        filter.reset();
        let mut off_center = sine(150.0, 1024);
        filter.render(&mut off_center, SAMPLE_RATE);
        let off_peak = peak_after_transient(&off_center);

        assert!(
            center_peak > off_peak * 2.0,
            "bandpass should emphasize cutoff: center={center_peak}, off={off_peak}"
        );
    }

    #[test]
    fn allpass_preserves_amplitude() {
        let mut filter = SVFilter::allpass(1_000.0);
        let mut buffer = sine(440.0, 2048);
        filter.render(&mut buffer, SAMPLE_RATE);

        let peak = peak_after_transient(&buffer);
        assert!(
            (0.8..=1.2).contains(&peak),
            "allpass should keep amplitude near unity, got {peak}"
        );
    }

    #[test]
    fn one_pole_never_exceeds_input_peak() {
        let mut damper = OnePoleLowpass::new(5_000.0, SAMPLE_RATE);
        let mut peak = 0.0f32;
        for sample in sine(440.0, 4096) {
            peak = peak.max(damper.next_sample(sample).abs());
        }
        assert!(peak <= 1.0 + 1e-4);
    }

    #[test]
    fn one_pole_smooths_steps() {
        let mut damper = OnePoleLowpass::new(100.0, SAMPLE_RATE);
        let first = damper.next_sample(1.0);
        assert!(first < 0.1, "low cutoff should respond slowly, got {first}");

        for _ in 0..SAMPLE_RATE as usize {
            damper.next_sample(1.0);
        }
        assert!((damper.next_sample(1.0) - 1.0).abs() < 1e-3);
    }
}
