use crate::graph::GraphNode;

pub type VoiceId = u64;

/// Returned to the trigger caller immediately. Fire-and-forget: the caller
/// never blocks on the sound, and a voice has no external cancel - its
/// lifetime was fixed by its parameters at trigger time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceHandle {
    pub id: VoiceId,
    pub duration_secs: f32,
}

/// One live voice: its graph, and the frame at which the lifecycle ledger
/// will tear it down.
pub(crate) struct ActiveVoice {
    pub id: VoiceId,
    pub graph: Box<dyn GraphNode>,
    pub expires_at: u64,
    released: bool,
}

impl ActiveVoice {
    pub fn new(id: VoiceId, graph: Box<dyn GraphNode>, expires_at: u64) -> Self {
        Self {
            id,
            graph,
            expires_at,
            released: false,
        }
    }

    /// Disconnect this voice from the graph. Idempotent: releasing an
    /// already-released voice is a no-op, which is what makes the deferred
    /// teardown race-free.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

/*
Lifecycle Ledger
================

The single owned collection of (voice, expiry) pairs. Voices enter when the
engine installs a spawn message and leave exactly once, when the engine's
block tick drains everything whose expiry has passed. Keeping teardown in
one drained ledger - rather than a deferred callback per voice - gives one
auditable place where lifetime and resource release are enforced, and makes
"1000 short triggers don't grow the live set" a property of a single loop.
*/
pub(crate) struct Lifecycle {
    voices: Vec<ActiveVoice>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self { voices: Vec::new() }
    }

    pub fn admit(&mut self, voice: ActiveVoice) {
        self.voices.push(voice);
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn voices_mut(&mut self) -> impl Iterator<Item = &mut ActiveVoice> {
        self.voices.iter_mut()
    }

    /// Release a specific voice. Unknown or already-released ids are
    /// no-ops, never errors - by the time a deferred teardown runs, its
    /// voice may long since have expired.
    pub fn release(&mut self, id: VoiceId) {
        if let Some(voice) = self.voices.iter_mut().find(|v| v.id == id) {
            voice.release();
        }
    }

    /// Drain every voice whose expiry has passed. Returns how many were
    /// torn down.
    pub fn reap(&mut self, now_frames: u64) -> usize {
        let before = self.voices.len();
        self.voices.retain_mut(|voice| {
            if now_frames >= voice.expires_at {
                voice.release();
                false
            } else {
                true
            }
        });
        before - self.voices.len()
    }
}
