//! Spectrum helpers for consumers of the analysis sink.
//!
//! A visualizer polls `EngineHandle::analysis_snapshot` for raw samples;
//! these helpers turn a snapshot into frequency-domain facts. They allocate
//! and are meant for the control path (or tests), never the audio callback.

use rustfft::{num_complex::Complex32, FftPlanner};

/// Magnitude spectrum of a sample window: one value per bin up to Nyquist,
/// normalized by window length.
pub fn magnitude_spectrum(window: &[f32]) -> Vec<f32> {
    if window.len() < 2 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(window.len());

    let mut buffer: Vec<Complex32> = window.iter().map(|&s| Complex32::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    let scale = 1.0 / window.len() as f32;
    buffer
        .iter()
        .take(window.len() / 2)
        .map(|bin| bin.norm() * scale)
        .collect()
}

/// Frequency of the strongest non-DC bin, or `None` for (near-)silence.
///
/// Resolution is `sample_rate / window.len()`; callers comparing against a
/// target should allow at least one bin of slack.
pub fn dominant_frequency(window: &[f32], sample_rate: f32) -> Option<f32> {
    let spectrum = magnitude_spectrum(window);

    let (bin, magnitude) = spectrum
        .iter()
        .enumerate()
        .skip(1) // DC carries no pitch
        .max_by(|(_, a), (_, b)| a.total_cmp(b))?;

    if *magnitude < 1e-6 {
        return None;
    }

    Some(bin as f32 * sample_rate / window.len() as f32)
}
