use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::Track;

/// Failures from the underlying audio engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Notifications an engine can emit between commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The queue head played to its end; the engine moved on to the next
    /// queued track (or went silent if the queue is exhausted).
    TrackFinished,
}

/// A queue-based audio playback primitive.
///
/// The playback queue is exclusively owned and mutated by the controller;
/// implementations must not reorder or refill it on their own. `seek` and
/// `position` are intra-track seconds of the current queue head.
pub trait MediaEngine: Send {
    /// Append a track to the end of the playback queue.
    fn insert(&mut self, track: &Track) -> Result<(), EngineError>;

    /// Drop the whole queue and any playing audio.
    fn remove_all(&mut self);

    /// Seek within the current queue head.
    fn seek(&mut self, to: f64) -> Result<(), EngineError>;

    fn play(&mut self);

    fn pause(&mut self);

    /// Set the playback rate (applies to current and future queue heads).
    fn set_rate(&mut self, rate: f32);

    /// Elapsed intra-track seconds of the current queue head.
    fn position(&self) -> f64;

    /// Poll for the active-item-finished notification.
    fn poll(&mut self) -> Option<EngineEvent>;
}
