use thiserror::Error;

/// Errors surfaced by the engine's control path.
///
/// Nothing here is fatal to a running engine: an invalid trigger creates no
/// voice, and a failed audio backend leaves the engine retryable on the next
/// attempt. Tearing down an already-released voice is deliberately NOT an
/// error; the lifecycle ledger treats it as a no-op.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A trigger parameter was rejected during validation. The voice is never
    /// created; values that would break the decay invariant (e.g. a damping
    /// factor of 1.0) are refused rather than silently clamped.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// The audio backend could not be initialized. Surfaced once at first
    /// use; the caller may retry on the next attempt.
    #[error("audio backend unavailable: {reason}")]
    ResourceUnavailable { reason: String },
}

pub type Result<T> = core::result::Result<T, EngineError>;
