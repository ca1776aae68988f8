use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::config::PlaybackSettings;
use crate::library::{Chapter, PlayableItem, Track};
use crate::prefs::{RateKey, RateStore};
use crate::reporter::ProgressReporter;

use super::engine::{EngineError, MediaEngine};
use super::error::PlaybackError;
use super::resolver;
use super::session::PlaybackSession;

/// Owns the [`PlaybackSession`] and mediates every seek/play/pause/rate
/// request, turning each into engine commands plus updated session state.
///
/// Not internally synchronized: all calls must come from one owner (the
/// playback thread serializes them; see [`super::Player`]).
pub struct PlaybackController {
    engine: Box<dyn MediaEngine>,
    rates: Box<dyn RateStore>,
    settings: PlaybackSettings,
    reporter: Option<Box<dyn ProgressReporter>>,
    pub(crate) session: PlaybackSession,
}

impl PlaybackController {
    pub fn new(
        engine: Box<dyn MediaEngine>,
        rates: Box<dyn RateStore>,
        settings: PlaybackSettings,
    ) -> Self {
        let session = PlaybackSession {
            rate: settings.default_rate,
            ..PlaybackSession::default()
        };
        Self {
            engine,
            rates,
            settings,
            reporter: None,
            session,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Absolute position on the item timeline, 0.0 when nothing is active.
    pub fn current_time(&self) -> f64 {
        match self.session.active_track {
            Some(i) => self.session.tracks[i].offset + self.engine.position(),
            None => 0.0,
        }
    }

    /// Start playback of `item` at `start_time`.
    ///
    /// Replaces any existing session. The per-item remembered rate (or the
    /// global default) is applied before the initial seek.
    pub fn load(
        &mut self,
        item: PlayableItem,
        mut tracks: Vec<Track>,
        mut chapters: Vec<Chapter>,
        start_time: f64,
        reporter: Box<dyn ProgressReporter>,
    ) -> Result<(), PlaybackError> {
        if tracks.is_empty() {
            warn!(item = %item.id, "ignoring load with empty track list");
            return Err(PlaybackError::InvalidRequest("empty track list"));
        }

        self.stop();

        tracks.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        chapters.sort_by(|a, b| a.start.total_cmp(&b.start));

        let rate_key = RateKey::for_item(&item);
        let rate = self
            .rates
            .rate_for(&rate_key)
            .unwrap_or(self.settings.default_rate);

        debug!(item = %item.id, tracks = tracks.len(), start_time, "loading item");
        self.session.item = Some(item);
        self.session.rate_key = Some(rate_key);
        self.session.tracks = tracks;
        self.session.chapters = chapters;
        self.reporter = Some(reporter);

        if let Err(e) = self.set_playback_rate(rate) {
            self.stop();
            return Err(e);
        }

        if let Err(e) = self.seek(start_time, false) {
            // A load that cannot position itself leaves the player idle.
            self.stop();
            return Err(e);
        }
        if self.session.is_idle() {
            // start_time was at/past the end; the seek already reported
            // completion and stopped.
            return Ok(());
        }

        self.set_playing(true);
        Ok(())
    }

    /// Move playback to the absolute position `to`.
    ///
    /// With `include_chapter_offset`, `to` is relative to the start of the
    /// chapter currently playing. A target at/past the item's end completes
    /// the item: final progress is reported and the session stops.
    pub fn seek(&mut self, to: f64, include_chapter_offset: bool) -> Result<(), PlaybackError> {
        if to < 0.0 {
            return self.seek(0.0, include_chapter_offset);
        }

        let mut to = to;
        if include_chapter_offset {
            if let Some(c) = resolver::chapter_at(&self.session.chapters, self.current_time()) {
                to += self.session.chapters[c].start;
            }
        }

        let duration = resolver::total_duration(&self.session.tracks);
        if to >= duration && duration > 0.0 {
            self.report_progress_with(false, duration, duration);
            self.stop();
            return Ok(());
        }

        match resolver::locate(&self.session.tracks, to) {
            Some(index) if Some(index) == self.session.active_track => {
                let offset = resolver::intra_track_offset(&self.session.tracks[index], to);
                self.engine.seek(offset)?;
            }
            Some(index) => {
                let resume = self.session.playing;
                let prev = self.session.active_track;

                self.engine.pause();
                self.engine.remove_all();

                if let Err(e) = self.rebuild_queue(index, to) {
                    self.session.active_track = prev;
                    return Err(e.into());
                }

                self.session.active_track = Some(index);
                // Clearing the queue reset the engine transport; rate and
                // play/pause intent have to be restored.
                self.engine.set_rate(self.session.rate);
                self.apply_playing(resume);
            }
            None => {
                error!(position = to, duration, "seek target not covered by any track");
                return Err(PlaybackError::RangeFault {
                    position: to,
                    duration,
                });
            }
        }

        Ok(())
    }

    /// Resume or pause playback.
    ///
    /// Resuming after a pause longer than the smart-rewind threshold first
    /// rewinds by the configured amount, to re-orient the listener.
    pub fn set_playing(&mut self, playing: bool) {
        if self.session.item.is_none() {
            debug!(playing, "ignoring transport request without an item");
            return;
        }

        if playing {
            if let Some(paused_at) = self.session.last_pause.take() {
                let threshold = Duration::from_secs(self.settings.smart_rewind_after_secs);
                if self.settings.smart_rewind && paused_at.elapsed() >= threshold {
                    let target = self.current_time() - self.settings.smart_rewind_by_secs as f64;
                    debug!(target, "smart rewind after long pause");
                    // The rewind may cross a track boundary; the rebuilt
                    // queue must come back up playing.
                    self.session.playing = true;
                    if let Err(e) = self.seek(target, false) {
                        warn!(error = %e, "smart rewind seek failed");
                    }
                }
            }
        } else if self.settings.smart_rewind {
            self.session.last_pause = Some(Instant::now());
        }

        self.apply_playing(playing);
    }

    /// Set the playback rate for the session and remember it for the item.
    pub fn set_playback_rate(&mut self, rate: f32) -> Result<(), PlaybackError> {
        if !(rate > 0.0) {
            warn!(rate, "rejecting playback rate");
            return Err(PlaybackError::InvalidRequest("playback rate must be > 0"));
        }

        self.session.rate = rate;
        if let Some(key) = &self.session.rate_key {
            self.rates.set_rate(key, rate);
        }
        if self.session.active_track.is_some() {
            self.engine.set_rate(rate);
        }
        Ok(())
    }

    /// Tear down the session. Idempotent.
    pub fn stop(&mut self) {
        if self.session.is_idle() {
            return;
        }
        debug!("stopping playback session");
        self.session.clear();
        self.reporter = None;
        self.engine.remove_all();
    }

    /// The engine finished its queue head and moved on (or went silent).
    pub fn handle_track_finished(&mut self) {
        let Some(i) = self.session.active_track else {
            return;
        };

        let next = i + 1;
        if next < self.session.tracks.len() {
            self.session.active_track = Some(next);
            self.report_progress();
        } else {
            let duration = resolver::total_duration(&self.session.tracks);
            self.report_progress_with(false, duration, duration);
            self.stop();
        }
    }

    /// Drain pending engine notifications.
    pub fn poll_engine(&mut self) {
        while let Some(event) = self.engine.poll() {
            match event {
                super::engine::EngineEvent::TrackFinished => self.handle_track_finished(),
            }
        }
    }

    /// Enqueue the track at `index` plus everything after it, positioned at
    /// the intra-track offset for `to`.
    fn rebuild_queue(&mut self, index: usize, to: f64) -> Result<(), EngineError> {
        self.engine.insert(&self.session.tracks[index])?;
        for track in resolver::queue_after(&self.session.tracks, to) {
            self.engine.insert(track)?;
        }
        let offset = resolver::intra_track_offset(&self.session.tracks[index], to);
        self.engine.seek(offset)
    }

    /// Apply a play/pause intent without smart-rewind bookkeeping.
    fn apply_playing(&mut self, playing: bool) {
        if playing {
            self.engine.play();
        } else {
            self.engine.pause();
        }
        self.session.playing = playing;
        self.report_progress();
    }

    fn report_progress(&self) {
        let duration = resolver::total_duration(&self.session.tracks);
        self.report_progress_with(self.session.playing, self.current_time(), duration);
    }

    fn report_progress_with(&self, playing: bool, current_time: f64, duration: f64) {
        if let Some(reporter) = &self.reporter {
            reporter.report_progress(playing, current_time, duration);
        }
    }
}
