use std::time::Instant;

/// Pause/resume bookkeeping for the current queue head.
///
/// `accumulated` holds audio seconds already consumed; while running, the
/// wall-clock time since `started_at` is added on top, scaled by the
/// playback rate (audio seconds per wall-clock second).
#[derive(Debug)]
pub(crate) struct TransportClock {
    accumulated: f64,
    started_at: Option<Instant>,
    rate: f32,
}

impl TransportClock {
    pub(crate) fn new(rate: f32) -> Self {
        Self {
            accumulated: 0.0,
            started_at: None,
            rate,
        }
    }

    /// Stop the clock and pin it to `at` audio seconds.
    pub(crate) fn reset_to(&mut self, at: f64) {
        self.accumulated = at;
        self.started_at = None;
    }

    pub(crate) fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(crate) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed().as_secs_f64() * self.rate as f64;
        }
    }

    /// Rate changes must not rescale time already played.
    pub(crate) fn set_rate(&mut self, rate: f32) {
        let running = self.started_at.is_some();
        if running {
            self.pause();
        }
        self.rate = rate;
        if running {
            self.start();
        }
    }

    pub(crate) fn elapsed(&self) -> f64 {
        self.accumulated
            + self
                .started_at
                .map(|st| st.elapsed().as_secs_f64() * self.rate as f64)
                .unwrap_or(0.0)
    }
}
