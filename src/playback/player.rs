use std::sync::mpsc::{self, SendError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::PlaybackSettings;
use crate::library::{Chapter, PlayableItem, Track};
use crate::prefs::RateStore;
use crate::reporter::ProgressReporter;

use super::engine::MediaEngine;
use super::thread::spawn_playback_thread;
use super::types::{PlaybackHandle, PlaybackInfo, PlayerCmd};

/// Handle to a playback session running on its own thread.
///
/// Every request is sent over a channel to the thread owning the
/// [`super::PlaybackController`], so all session mutation is serialized
/// through a single owner. Observers read the shared [`PlaybackInfo`]
/// handle.
pub struct Player {
    tx: Sender<PlayerCmd>,
    info: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new(
        engine: Box<dyn MediaEngine>,
        rates: Box<dyn RateStore>,
        settings: PlaybackSettings,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_playback_thread(engine, rates, settings, rx, info.clone());

        Self {
            tx,
            info,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.info.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    pub fn load(
        &self,
        item: PlayableItem,
        tracks: Vec<Track>,
        chapters: Vec<Chapter>,
        start_time: f64,
        reporter: Box<dyn ProgressReporter>,
    ) -> Result<(), SendError<PlayerCmd>> {
        self.send(PlayerCmd::Load {
            item,
            tracks,
            chapters,
            start_time,
            reporter,
        })
    }

    /// Request a seek against the session observed right now; the playback
    /// thread drops it if the session changed in between.
    pub fn seek(&self, to: f64, include_chapter_offset: bool) -> Result<(), SendError<PlayerCmd>> {
        self.send(PlayerCmd::Seek {
            to,
            include_chapter_offset,
            generation: self.generation(),
        })
    }

    pub fn set_playing(&self, playing: bool) -> Result<(), SendError<PlayerCmd>> {
        self.send(PlayerCmd::SetPlaying {
            playing,
            generation: self.generation(),
        })
    }

    pub fn set_playback_rate(&self, rate: f32) -> Result<(), SendError<PlayerCmd>> {
        self.send(PlayerCmd::SetRate(rate))
    }

    pub fn stop(&self) -> Result<(), SendError<PlayerCmd>> {
        self.send(PlayerCmd::Stop)
    }

    /// Stop playback and join the playback thread.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn generation(&self) -> u64 {
        self.info.lock().map(|i| i.generation).unwrap_or(0)
    }
}
