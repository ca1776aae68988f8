use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::PlaybackSettings;
use crate::prefs::RateStore;

use super::controller::PlaybackController;
use super::engine::MediaEngine;
use super::error::PlaybackError;
use super::resolver;
use super::types::{PlaybackHandle, PlayerCmd};

/// How long to wait for a command before polling the engine.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub(super) fn spawn_playback_thread(
    engine: Box<dyn MediaEngine>,
    rates: Box<dyn RateStore>,
    settings: PlaybackSettings,
    rx: Receiver<PlayerCmd>,
    info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut controller = PlaybackController::new(engine, rates, settings);

        let mut running = true;
        while running {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(cmd) => handle_cmd(&mut controller, cmd, &mut running),
                Err(RecvTimeoutError::Timeout) => {
                    // Auto-advance: the engine only reports finished heads
                    // when polled.
                    controller.poll_engine();
                }
                Err(RecvTimeoutError::Disconnected) => {
                    controller.stop();
                    running = false;
                }
            }

            publish_info(&controller, &info);
        }
    })
}

fn handle_cmd(controller: &mut PlaybackController, cmd: PlayerCmd, running: &mut bool) {
    match cmd {
        PlayerCmd::Load {
            item,
            tracks,
            chapters,
            start_time,
            reporter,
        } => {
            if let Err(e) = controller.load(item, tracks, chapters, start_time, reporter) {
                warn!(error = %e, "load failed");
            }
        }

        PlayerCmd::Seek {
            to,
            include_chapter_offset,
            generation,
        } => {
            if generation != controller.session().generation() {
                debug!(generation, "dropping seek against a stale session");
                return;
            }
            if let Err(e) = controller.seek(to, include_chapter_offset) {
                // Range faults were already logged by the controller and
                // leave the session unchanged; only engine trouble is news.
                if matches!(e, PlaybackError::Engine(_)) {
                    warn!(error = %e, "seek failed");
                }
            }
        }

        PlayerCmd::SetPlaying {
            playing,
            generation,
        } => {
            if generation != controller.session().generation() {
                debug!(generation, "dropping transport request against a stale session");
                return;
            }
            controller.set_playing(playing);
        }

        PlayerCmd::SetRate(rate) => {
            if let Err(e) = controller.set_playback_rate(rate) {
                warn!(error = %e, "rate change rejected");
            }
        }

        PlayerCmd::Stop => controller.stop(),

        PlayerCmd::Quit => {
            controller.stop();
            *running = false;
        }
    }
}

fn publish_info(controller: &PlaybackController, info: &PlaybackHandle) {
    if let Ok(mut i) = info.lock() {
        let session = controller.session();
        i.item_id = session.item().map(|item| item.id.clone());
        i.state = session.state();
        i.active_track = session.active_track();
        i.position = controller.current_time();
        i.duration = resolver::total_duration(session.tracks());
        i.playing = session.playing();
        i.rate = session.rate();
        i.generation = session.generation();
    }
}
