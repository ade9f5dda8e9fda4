//! Play a strum and a drum fill through the default output device.
//!
//! Run with: cargo run --example live_output

use std::{thread, time::Duration};

use plectra_dsp::io::output::{default_sample_rate, OutputStream};
use plectra_dsp::voices::params::{HihatParams, KickParams, PercussionParams, PluckParams};
use plectra_dsp::{EngineConfig, PlectraEngine};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let sample_rate = default_sample_rate()?;
    let config = EngineConfig {
        sample_rate,
        ..Default::default()
    };
    let (engine, mut handle) = PlectraEngine::new(config);
    let _stream = OutputStream::start(engine)?;

    // Strum low to high, then a quick kick/hat figure over the ring-out.
    for freq in [82.41, 110.0, 146.83, 196.0, 246.94, 329.63] {
        handle.trigger_pluck(PluckParams {
            frequency_hz: freq,
            sustain_secs: 2.5,
            ..Default::default()
        })?;
        thread::sleep(Duration::from_millis(60));
    }

    for _ in 0..4 {
        handle.trigger_percussive(PercussionParams::Kick(KickParams::default()))?;
        thread::sleep(Duration::from_millis(250));
        handle.trigger_percussive(PercussionParams::Hihat(HihatParams::default()))?;
        thread::sleep(Duration::from_millis(250));
    }

    thread::sleep(Duration::from_secs(2));
    Ok(())
}
