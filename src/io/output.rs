use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;

use crate::error::{EngineError, Result};
use crate::synth::engine::PlectraEngine;
use crate::MAX_BLOCK_SIZE;

/// Sample rate of the default output device, for building a matching
/// `EngineConfig` before `OutputStream::start`.
pub fn default_sample_rate() -> Result<f32> {
    let device = default_device()?;
    let config = device
        .default_output_config()
        .map_err(|e| unavailable(format!("no default output config: {e}")))?;
    Ok(config.sample_rate().0 as f32)
}

/// A running cpal output stream pulling blocks from the engine.
///
/// Dropping this stops playback. Construction failures surface
/// `ResourceUnavailable` once and leave nothing half-initialized; the caller
/// may simply retry with a fresh engine.
pub struct OutputStream {
    _stream: cpal::Stream,
    sample_rate: f32,
}

impl OutputStream {
    /// Take ownership of the audio side of an engine and start pulling
    /// blocks from it on the device callback.
    pub fn start(mut engine: PlectraEngine) -> Result<Self> {
        let device = default_device()?;
        let config = device
            .default_output_config()
            .map_err(|e| unavailable(format!("no default output config: {e}")))?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(unavailable(format!(
                "unsupported sample format {:?}",
                config.sample_format()
            )));
        }

        let device_rate = config.sample_rate().0 as f32;
        if (device_rate - engine.sample_rate()).abs() > 0.5 {
            log::warn!(
                "engine rate {} does not match device rate {device_rate}; \
                 pitches will be off",
                engine.sample_rate()
            );
        }

        let channels = config.channels() as usize;
        let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                    // The device hands us interleaved frames of arbitrary
                    // length; render mono blocks and copy across channels.
                    for chunk in data.chunks_mut(channels * MAX_BLOCK_SIZE) {
                        let frames = chunk.len() / channels;
                        let block = &mut mono[..frames];
                        engine.render_block(block);
                        for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                            frame.fill(sample);
                        }
                    }
                },
                |err| log::error!("output stream error: {err}"),
                None,
            )
            .map_err(|e| unavailable(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| unavailable(format!("failed to start output stream: {e}")))?;

        log::info!("output stream running at {device_rate} Hz, {channels} channel(s)");

        Ok(Self {
            _stream: stream,
            sample_rate: device_rate,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

fn default_device() -> Result<cpal::Device> {
    cpal::default_host()
        .default_output_device()
        .ok_or_else(|| unavailable("no default output device".into()))
}

fn unavailable(reason: String) -> EngineError {
    EngineError::ResourceUnavailable { reason }
}
