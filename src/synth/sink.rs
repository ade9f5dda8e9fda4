use rtrb::{Consumer, Producer, RingBuffer};

/*
Sinks
=====

Every mixed block fans out to exactly three consumers, fixed at engine
construction and never renegotiated per voice:

  audible   the output buffer the audio callback hands in - the fan-out's
            first leg is the block itself
  capture   a wait-free ring an external recorder drains at its own pace
  analysis  a wait-free ring the control side folds into a rolling window
            for visualizers to poll

Sinks are pure consumers: they never originate signal, and fan-in is
additive mixing performed upstream. Both rings drop samples rather than
block when their consumer falls behind - the realtime path must never wait.
*/

pub(crate) struct SinkFanout {
    capture_tx: Producer<f32>,
    analysis_tx: Producer<f32>,
}

impl SinkFanout {
    /// Push one mixed block to the capture and analysis legs.
    pub fn dispatch(&mut self, block: &[f32]) {
        for &sample in block {
            // A full ring means the consumer is not draining; dropping is
            // the contract, blocking is not an option here.
            let _ = self.capture_tx.push(sample);
            let _ = self.analysis_tx.push(sample);
        }
    }
}

/// Opaque handle an external recorder attaches to. Non-blocking reads of
/// whatever the engine has produced since the last read.
pub struct CaptureStream {
    rx: Consumer<f32>,
}

impl CaptureStream {
    /// Copy pending samples into `out`, returning how many were written.
    pub fn read(&mut self, out: &mut [f32]) -> usize {
        let mut written = 0;
        for slot in out.iter_mut() {
            match self.rx.pop() {
                Ok(sample) => {
                    *slot = sample;
                    written += 1;
                }
                Err(_) => break,
            }
        }
        written
    }

    /// Drain everything pending. Allocates; control-path only.
    pub fn drain(&mut self) -> Vec<f32> {
        let mut samples = Vec::with_capacity(self.rx.slots());
        while let Ok(sample) = self.rx.pop() {
            samples.push(sample);
        }
        samples
    }
}

/// Pollable window of the most recent samples, for visualizers.
///
/// The audio side only pushes into a ring; this side folds the ring into a
/// rolling window on each poll. A poll is non-blocking and always returns a
/// full window, oldest sample first, zero-padded only until the engine has
/// produced its first `window_len` samples.
pub struct AnalysisSink {
    rx: Consumer<f32>,
    ring: Vec<f32>,
    cursor: usize,
    snapshot: Vec<f32>,
}

impl AnalysisSink {
    fn new(rx: Consumer<f32>, window_len: usize) -> Self {
        Self {
            rx,
            ring: vec![0.0; window_len],
            cursor: 0,
            snapshot: vec![0.0; window_len],
        }
    }

    pub fn window_len(&self) -> usize {
        self.ring.len()
    }

    /// The most recent `window_len` samples in production order.
    pub fn snapshot(&mut self) -> &[f32] {
        let len = self.ring.len();
        while let Ok(sample) = self.rx.pop() {
            self.ring[self.cursor] = sample;
            self.cursor = (self.cursor + 1) % len;
        }

        for (i, slot) in self.snapshot.iter_mut().enumerate() {
            *slot = self.ring[(self.cursor + i) % len];
        }
        &self.snapshot
    }
}

/// Build the fixed fan-out and its two external consumers.
pub(crate) fn create_sinks(
    capture_capacity: usize,
    analysis_window: usize,
) -> (SinkFanout, CaptureStream, AnalysisSink) {
    let (capture_tx, capture_rx) = RingBuffer::new(capture_capacity);
    // The ring drops its NEWEST samples once full, so it is sized for well
    // over a second of backlog: any per-frame poll cadence drains it long
    // before that, and every snapshot ends at the latest produced sample.
    let (analysis_tx, analysis_rx) = RingBuffer::new(analysis_window * 64);

    (
        SinkFanout {
            capture_tx,
            analysis_tx,
        },
        CaptureStream { rx: capture_rx },
        AnalysisSink::new(analysis_rx, analysis_window),
    )
}
