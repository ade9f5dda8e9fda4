//! Render a short performance offline and print level statistics.
//!
//! Run with: cargo run --example offline_bounce

use plectra_dsp::voices::params::{
    Ensemble, HihatParams, KickParams, PercussionParams, PluckParams, SnareParams,
};
use plectra_dsp::{EngineConfig, EngineHandle, PlectraEngine};

const SAMPLE_RATE: f32 = 44_100.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let config = EngineConfig {
        sample_rate: SAMPLE_RATE,
        ..Default::default()
    };
    let (mut engine, mut handle) = PlectraEngine::new(config);
    let mut capture = handle.take_capture_stream().expect("fresh engine");

    // One bar at 120 BPM: four beats of drums under an arpeggiated chord.
    let mut bounce = Vec::new();
    for beat in 0..4 {
        trigger_beat(&mut handle, beat)?;

        let beat_samples = (0.5 * SAMPLE_RATE) as usize;
        let mut block = vec![0.0f32; 512];
        let mut rendered = 0;
        while rendered < beat_samples {
            engine.render_block(&mut block);
            rendered += block.len();
            bounce.extend_from_slice(&capture.drain());
        }
    }

    let peak = bounce.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let rms = (bounce.iter().map(|s| s * s).sum::<f32>() / bounce.len() as f32).sqrt();

    println!("bounced {} samples ({:.2}s)", bounce.len(), bounce.len() as f32 / SAMPLE_RATE);
    println!("peak {peak:.3}, rms {rms:.3}");
    println!("voices still live: {}", engine.live_voices());

    Ok(())
}

fn trigger_beat(handle: &mut EngineHandle, beat: usize) -> color_eyre::Result<()> {
    handle.trigger_percussive(PercussionParams::Kick(KickParams::default()))?;
    handle.trigger_percussive(PercussionParams::Hihat(HihatParams::default()))?;
    if beat % 2 == 1 {
        handle.trigger_percussive(PercussionParams::Snare(SnareParams::default()))?;
    }

    // A minor triad, one note per beat, ensemble voicing on the root.
    let chord = [220.0, 261.63, 329.63, 440.0];
    handle.trigger_pluck(PluckParams {
        frequency_hz: chord[beat],
        sustain_secs: 1.5,
        ensemble: (beat == 0).then(Ensemble::default),
        ..Default::default()
    })?;

    Ok(())
}
