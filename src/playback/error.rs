use thiserror::Error;

use super::engine::EngineError;

/// Failures a playback request can produce.
///
/// `InvalidRequest` and `RangeFault` are recoverable-degraded: the session
/// is left unchanged and playback continues from its prior position.
/// `Engine` failures are propagated so the caller knows the seek/load did
/// not take effect.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    /// No track covered a position inside `[0, duration)`; the track data
    /// violates its own layout invariants.
    #[error("no track covers position {position:.3}s (item duration {duration:.3}s)")]
    RangeFault { position: f64, duration: f64 },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
