//! Legato: a multi-track audiobook and podcast playback engine.
//!
//! A playable item (an audiobook, a podcast episode) is made of one or more
//! audio tracks laid out on a single timeline. The [`playback`] module maps
//! absolute item positions onto tracks, keeps the playback queue of a
//! [`playback::MediaEngine`] in sync, and owns the session state machine
//! (play/pause, rate, smart rewind). [`library`] assembles items from audio
//! files on disk, [`prefs`] remembers per-item playback rates and [`config`]
//! holds the static settings.

pub mod config;
pub mod library;
pub mod playback;
pub mod prefs;
pub mod reporter;
pub mod runtime;
