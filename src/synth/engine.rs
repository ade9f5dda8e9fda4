use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::Result;
use crate::graph::{GraphNode, RenderCtx};
use crate::synth::message::EngineMessage;
use crate::synth::sink::{create_sinks, AnalysisSink, CaptureStream, SinkFanout};
use crate::synth::voice::{ActiveVoice, Lifecycle, VoiceHandle, VoiceId};
use crate::voices::params::{PercussionParams, PluckParams};
use crate::{voices, MAX_BLOCK_SIZE};

/*
The Engine Pair
===============

`PlectraEngine::new` builds the whole processing graph at once - sample
clock, sinks, queues - and splits it into the two halves of the control/audio
seam:

  PlectraEngine   audio side. Owns the frame clock, the live voices, and the
                  sink fan-out. `render_block` runs on the realtime deadline:
                  drain the spawn queue, mix every live voice, fan out, reap.
                  No locks, no blocking, no allocation in the sample loop.

  EngineHandle    control side. Validates parameters, builds voice graphs,
                  and enqueues them; returns a VoiceHandle immediately.
                  Also the polling surface for the analysis window and the
                  take-once capture stream.

Exactly one engine exists per audio session, and it is fully constructed
before any voice can be triggered - there is no ambient global to reach for.
*/

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Spawn-queue slots. Triggers beyond this while the audio side stalls
    /// are dropped, not blocked on.
    pub queue_capacity: usize,
    /// Capture-ring slots available to a recorder between drains.
    pub capture_capacity: usize,
    /// Samples in the pollable analysis window.
    pub analysis_window: usize,
    /// Grace period past a voice's scheduled duration before teardown.
    pub safety_margin_secs: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            queue_capacity: 256,
            capture_capacity: 1 << 16,
            analysis_window: 1_024,
            safety_margin_secs: 0.05,
        }
    }
}

/// Audio side: pulls spawn messages, renders and mixes live voices, fans the
/// mix out to the sinks, and reaps expired voices. Drive it from an audio
/// callback (`io::output`) or render offline.
pub struct PlectraEngine {
    rx: Consumer<EngineMessage>,
    lifecycle: Lifecycle,
    fanout: SinkFanout,
    temp_buffer: Vec<f32>,
    frames: u64,
    sample_rate: f32,
}

/// Control side: validation, voice construction, triggering, polling.
pub struct EngineHandle {
    tx: Producer<EngineMessage>,
    analysis: AnalysisSink,
    capture: Option<CaptureStream>,
    next_id: VoiceId,
    sample_rate: f32,
    safety_margin_secs: f32,
}

impl PlectraEngine {
    pub fn new(config: EngineConfig) -> (Self, EngineHandle) {
        let (tx, rx) = RingBuffer::new(config.queue_capacity);
        let (fanout, capture, analysis) =
            create_sinks(config.capture_capacity, config.analysis_window);

        let engine = Self {
            rx,
            lifecycle: Lifecycle::new(),
            fanout,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frames: 0,
            sample_rate: config.sample_rate,
        };
        let handle = EngineHandle {
            tx,
            analysis,
            capture: Some(capture),
            next_id: 0,
            sample_rate: config.sample_rate,
            safety_margin_secs: config.safety_margin_secs,
        };

        (engine, handle)
    }

    /// Render one block of mixed output. This is the realtime path.
    pub fn render_block(&mut self, out: &mut [f32]) {
        assert!(out.len() <= MAX_BLOCK_SIZE);
        let ctx = RenderCtx::new(self.sample_rate);

        // Install whatever the control path queued since the last block. The
        // expiry is stamped against this side's frame clock.
        while let Ok(message) = self.rx.pop() {
            match message {
                EngineMessage::Spawn {
                    id,
                    mut graph,
                    lifetime_samples,
                } => {
                    graph.trigger(&ctx);
                    self.lifecycle
                        .admit(ActiveVoice::new(id, graph, self.frames + lifetime_samples));
                }
            }
        }

        out.fill(0.0);
        let temp = &mut self.temp_buffer[..out.len()];

        for voice in self.lifecycle.voices_mut() {
            if voice.is_released() {
                continue;
            }
            temp.fill(0.0);
            voice.graph.render_block(temp, &ctx);
            for (o, s) in out.iter_mut().zip(temp.iter()) {
                *o += *s;
            }
        }

        self.fanout.dispatch(out);

        self.frames += out.len() as u64;
        self.lifecycle.reap(self.frames);
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Live voices currently held by the lifecycle ledger.
    pub fn live_voices(&self) -> usize {
        self.lifecycle.len()
    }
}

impl EngineHandle {
    /// Trigger a plucked-string voice. Validates synchronously - an invalid
    /// bundle creates no voice - then enqueues and returns immediately.
    pub fn trigger_pluck(&mut self, params: PluckParams) -> Result<VoiceHandle> {
        params.validate()?;
        let graph = voices::pluck(&params, self.sample_rate);
        Ok(self.spawn(graph, params.duration_secs()))
    }

    /// Trigger a percussive voice (kick, snare, hi-hat, or tom).
    pub fn trigger_percussive(&mut self, params: PercussionParams) -> Result<VoiceHandle> {
        params.validate()?;
        let graph = voices::percussive(&params, self.sample_rate);
        Ok(self.spawn(graph, params.duration_secs()))
    }

    fn spawn(&mut self, graph: Box<dyn GraphNode>, duration_secs: f32) -> VoiceHandle {
        let id = self.next_id;
        self.next_id += 1;

        let lifetime_samples =
            ((duration_secs + self.safety_margin_secs) * self.sample_rate).ceil() as u64;

        let message = EngineMessage::Spawn {
            id,
            graph,
            lifetime_samples,
        };
        if self.tx.push(message).is_err() {
            // Queue full: the audio side is not draining. The contract's
            // worst case is one dropped sound, never a blocked caller.
            log::warn!("trigger queue full; dropping voice {id}");
        } else {
            log::debug!("queued voice {id} ({duration_secs:.3}s + margin)");
        }

        VoiceHandle { id, duration_secs }
    }

    /// The most recent fixed-size window of engine output, oldest first.
    /// Non-blocking; meant to be polled on a renderer's frame cadence.
    pub fn analysis_snapshot(&mut self) -> &[f32] {
        self.analysis.snapshot()
    }

    pub fn analysis_window_len(&self) -> usize {
        self.analysis.window_len()
    }

    /// Hand the capture stream to an external recorder. Take-once: the
    /// engine keeps producing into it either way, dropping samples once the
    /// ring fills with nobody draining.
    pub fn take_capture_stream(&mut self) -> Option<CaptureStream> {
        self.capture.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::params::{HihatParams, KickParams};
    use crate::EngineError;

    fn test_config() -> EngineConfig {
        EngineConfig {
            sample_rate: 44_100.0,
            ..Default::default()
        }
    }

    fn render_secs(engine: &mut PlectraEngine, secs: f32) -> Vec<f32> {
        let total = (secs * engine.sample_rate()) as usize;
        let mut output = vec![0.0; total];
        for chunk in output.chunks_mut(512) {
            engine.render_block(chunk);
        }
        output
    }

    #[test]
    fn triggered_voice_sounds_and_expires() {
        let (mut engine, mut handle) = PlectraEngine::new(test_config());

        let handle_out = handle
            .trigger_percussive(PercussionParams::Kick(KickParams::default()))
            .unwrap();
        assert_eq!(handle_out.id, 0);

        let output = render_secs(&mut engine, 0.1);
        assert_eq!(engine.live_voices(), 1);
        assert!(output.iter().any(|s| s.abs() > 0.0));

        // Past duration + safety margin the ledger must be empty again.
        render_secs(&mut engine, 0.5);
        assert_eq!(engine.live_voices(), 0);
    }

    #[test]
    fn invalid_parameters_create_no_voice() {
        let (mut engine, mut handle) = PlectraEngine::new(test_config());

        let err = handle
            .trigger_pluck(PluckParams {
                damping: 1.0,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));

        render_secs(&mut engine, 0.05);
        assert_eq!(engine.live_voices(), 0);
    }

    #[test]
    fn voice_ids_are_unique_and_monotonic() {
        let (_engine, mut handle) = PlectraEngine::new(test_config());

        let a = handle.trigger_pluck(PluckParams::default()).unwrap();
        let b = handle.trigger_pluck(PluckParams::default()).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn queue_overflow_drops_instead_of_blocking() {
        let config = EngineConfig {
            queue_capacity: 4,
            ..test_config()
        };
        let (mut engine, mut handle) = PlectraEngine::new(config);

        // Nothing drains the queue while we flood it; all calls must still
        // return promptly and successfully.
        for _ in 0..64 {
            let hihat = PercussionParams::Hihat(HihatParams::default());
            handle.trigger_percussive(hihat).unwrap();
        }

        render_secs(&mut engine, 0.01);
        assert!(engine.live_voices() <= 4);
    }

    #[test]
    fn capture_stream_is_take_once() {
        let (_engine, mut handle) = PlectraEngine::new(test_config());
        assert!(handle.take_capture_stream().is_some());
        assert!(handle.take_capture_stream().is_none());
    }

    #[test]
    fn analysis_snapshot_tracks_engine_output() {
        let (mut engine, mut handle) = PlectraEngine::new(test_config());

        handle
            .trigger_percussive(PercussionParams::Kick(KickParams::default()))
            .unwrap();
        render_secs(&mut engine, 0.1);

        let snapshot = handle.analysis_snapshot();
        assert_eq!(snapshot.len(), test_config().analysis_window);
        assert!(snapshot.iter().any(|s| s.abs() > 0.0));
    }
}
