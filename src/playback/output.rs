//! Rodio-backed [`MediaEngine`].
//!
//! One `Sink` plays the current queue head; the remaining queue is kept as
//! plain track values and the next sink is built when the head runs out.
//! Seeking rebuilds the head sink with `Source::skip_duration`, which works
//! for the common formats without a seekable decoder.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::warn;

use crate::library::Track;

use super::clock::TransportClock;
use super::engine::{EngineError, EngineEvent, MediaEngine};

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    queue: VecDeque<Track>,
    clock: TransportClock,
    paused: bool,
    rate: f32,
}

impl RodioEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream =
            OutputStreamBuilder::open_default_stream().map_err(|_| EngineError::NoOutputDevice)?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for an interactive program.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            queue: VecDeque::new(),
            clock: TransportClock::new(1.0),
            paused: true,
            rate: 1.0,
        })
    }

    /// Replace the head sink with a fresh one positioned at `at` seconds.
    fn rebuild_sink(&mut self, at: f64) -> Result<(), EngineError> {
        if let Some(s) = self.sink.take() {
            s.stop();
        }

        let Some(track) = self.queue.front() else {
            self.clock.reset_to(0.0);
            return Ok(());
        };

        let at = at.max(0.0);
        let sink = create_sink_at(&self.stream, track, Duration::from_secs_f64(at))?;
        sink.set_speed(self.rate);
        self.clock.reset_to(at);
        if !self.paused {
            sink.play();
            self.clock.start();
        }
        self.sink = Some(sink);
        Ok(())
    }
}

impl MediaEngine for RodioEngine {
    fn insert(&mut self, track: &Track) -> Result<(), EngineError> {
        self.queue.push_back(track.clone());
        if self.sink.is_none() && self.queue.len() == 1 {
            self.rebuild_sink(0.0)?;
        }
        Ok(())
    }

    fn remove_all(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.queue.clear();
        self.clock.reset_to(0.0);
        // Clearing the queue resets the transport; the controller re-applies
        // its play/pause intent afterwards.
        self.paused = true;
    }

    fn seek(&mut self, to: f64) -> Result<(), EngineError> {
        self.rebuild_sink(to)
    }

    fn play(&mut self) {
        self.paused = false;
        if let Some(s) = &self.sink {
            s.play();
        }
        self.clock.start();
    }

    fn pause(&mut self) {
        self.paused = true;
        if let Some(s) = &self.sink {
            s.pause();
        }
        self.clock.pause();
    }

    fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
        self.clock.set_rate(rate);
        if let Some(s) = &self.sink {
            s.set_speed(rate);
        }
    }

    fn position(&self) -> f64 {
        match self.queue.front() {
            // The clock can overshoot slightly between polls; the head never
            // plays past its own duration.
            Some(track) => self.clock.elapsed().min(track.duration),
            None => 0.0,
        }
    }

    fn poll(&mut self) -> Option<EngineEvent> {
        let finished = self
            .sink
            .as_ref()
            .map(|s| s.empty() && !self.paused)
            .unwrap_or(false);
        if !finished {
            return None;
        }

        self.queue.pop_front();
        if self.queue.is_empty() {
            self.sink = None;
            self.clock.reset_to(0.0);
        } else if let Err(e) = self.rebuild_sink(0.0) {
            warn!(error = %e, "failed to start next queued track");
            self.queue.clear();
            self.sink = None;
        }
        Some(EngineEvent::TrackFinished)
    }
}

/// Create a paused `Sink` for `track` that starts playback at `start_at`.
fn create_sink_at(
    handle: &OutputStream,
    track: &Track,
    start_at: Duration,
) -> Result<Sink, EngineError> {
    let file = File::open(&track.path).map_err(|e| EngineError::Open {
        path: track.path.clone(),
        source: e,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| EngineError::Decode {
            path: track.path.clone(),
            source: e,
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
