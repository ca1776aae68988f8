//! Progress reporting collaborator.
//!
//! The playback controller pushes a progress snapshot after every transport
//! transition; where it goes (sync to a server, session log, nothing) is up
//! to the reporter the item was loaded with.

use tracing::debug;

pub trait ProgressReporter: Send {
    /// Called with post-transition state: whether playback runs, the
    /// absolute item position and the total item duration (seconds).
    fn report_progress(&self, playing: bool, current_time: f64, duration: f64);
}

/// Reporter that only logs.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report_progress(&self, playing: bool, current_time: f64, duration: f64) {
        debug!(playing, current_time, duration, "playback progress");
    }
}
