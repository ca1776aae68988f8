//! Playback core: position resolution, session state and the player.
//!
//! `resolver` maps absolute item positions onto tracks, `controller` owns
//! the session state machine and drives a [`MediaEngine`], and `player`
//! wraps the controller in a dedicated thread so every request is
//! serialized through a single owner.

mod clock;
mod controller;
mod engine;
mod error;
mod output;
mod player;
pub mod resolver;
mod session;
mod thread;
mod types;

pub use controller::PlaybackController;
pub use engine::{EngineError, EngineEvent, MediaEngine};
pub use error::PlaybackError;
pub use output::RodioEngine;
pub use player::Player;
pub use session::{PlaybackSession, PlaybackState};
pub use types::{PlaybackHandle, PlaybackInfo, PlayerCmd};
