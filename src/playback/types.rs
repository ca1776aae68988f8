//! Player commands and the shared playback-info handle.

use std::sync::{Arc, Mutex};

use crate::library::{Chapter, PlayableItem, Track};
use crate::reporter::ProgressReporter;

use super::session::PlaybackState;

/// Requests accepted by the playback thread.
pub enum PlayerCmd {
    /// Replace the current session with `item` and start playing.
    Load {
        item: PlayableItem,
        tracks: Vec<Track>,
        chapters: Vec<Chapter>,
        start_time: f64,
        reporter: Box<dyn ProgressReporter>,
    },
    /// Seek to an absolute position (or chapter-relative with
    /// `include_chapter_offset`). Dropped if `generation` is stale.
    Seek {
        to: f64,
        include_chapter_offset: bool,
        generation: u64,
    },
    /// Resume or pause. Dropped if `generation` is stale.
    SetPlaying { playing: bool, generation: u64 },
    /// Change the playback rate.
    SetRate(f32),
    /// Tear down the session.
    Stop,
    /// Stop and shut the playback thread down.
    Quit,
}

/// Runtime playback information shared with observers.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Id of the loaded item, if any.
    pub item_id: Option<String>,
    pub state: PlaybackState,
    /// Index of the active track in the item's track list.
    pub active_track: Option<usize>,
    /// Absolute position on the item timeline, seconds.
    pub position: f64,
    /// Total item duration, seconds.
    pub duration: f64,
    pub playing: bool,
    pub rate: f32,
    /// Session generation; bumped on stop/load.
    pub generation: u64,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            item_id: None,
            state: PlaybackState::Idle,
            active_track: None,
            position: 0.0,
            duration: 0.0,
            playing: false,
            rate: 1.0,
            generation: 0,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
