use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/legato/config.toml` or
/// `~/.config/legato/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LEGATO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackSettings::default(),
            library: LibrarySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Playback rate used when an item has no remembered rate.
    pub default_rate: f32,
    /// Whether to rewind slightly when resuming after a long pause.
    pub smart_rewind: bool,
    /// Pause length (seconds) after which the smart rewind kicks in.
    pub smart_rewind_after_secs: u64,
    /// How far to rewind (seconds) when it does.
    pub smart_rewind_by_secs: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_rate: 1.0,
            smart_rewind: true,
            smart_rewind_after_secs: 10 * 60,
            smart_rewind_by_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "m4a".into(),
                "m4b".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
            ],
            follow_links: true,
            include_hidden: true,
            max_depth: None,
        }
    }
}
