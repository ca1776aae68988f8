use std::time::Instant;

use crate::library::{Chapter, PlayableItem, Track};
use crate::prefs::RateKey;

/// The coarse state of a playback session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No item loaded.
    Idle,
    /// Item loaded, no track resolved yet.
    Loading,
    Playing,
    Paused,
}

/// Mutable per-item playback state, owned exclusively by the controller.
///
/// Single writer: every mutation goes through the controller's public
/// operations. `generation` is bumped on `stop`/`load` so requests queued
/// against an older session can be discarded.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    pub(crate) item: Option<PlayableItem>,
    pub(crate) rate_key: Option<RateKey>,
    pub(crate) tracks: Vec<Track>,
    pub(crate) chapters: Vec<Chapter>,

    pub(crate) active_track: Option<usize>,
    pub(crate) playing: bool,
    pub(crate) rate: f32,
    pub(crate) last_pause: Option<Instant>,

    pub(crate) generation: u64,
}

impl PlaybackSession {
    pub fn state(&self) -> PlaybackState {
        match (&self.item, self.active_track) {
            (None, _) => PlaybackState::Idle,
            (Some(_), None) => PlaybackState::Loading,
            (Some(_), Some(_)) if self.playing => PlaybackState::Playing,
            (Some(_), Some(_)) => PlaybackState::Paused,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == PlaybackState::Idle
    }

    pub fn item(&self) -> Option<&PlayableItem> {
        self.item.as_ref()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn active_track(&self) -> Option<usize> {
        self.active_track
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear everything but the generation counter, which only moves forward.
    pub(crate) fn clear(&mut self) {
        self.item = None;
        self.rate_key = None;
        self.tracks.clear();
        self.chapters.clear();
        self.active_track = None;
        self.playing = false;
        self.last_pause = None;
        self.generation += 1;
    }
}
