use std::path::PathBuf;
use std::time::Duration;

/// One contiguous audio segment of a playable item.
///
/// `offset` is the track's start on the item's overall timeline, `duration`
/// its length, both in seconds. A track list is kept sorted by ascending
/// offset with non-overlapping intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub offset: f64,
    pub duration: f64,
}

impl Track {
    /// Absolute end of the track on the item timeline.
    pub fn end(&self) -> f64 {
        self.offset + self.duration
    }

    /// Whether `t` falls inside this track's `[offset, end)` interval.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.offset && t < self.end()
    }
}

/// A chapter marker on the item timeline, `[start, end)` in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub title: String,
    pub start: f64,
    pub end: f64,
}

impl Chapter {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

/// What kind of item is loaded, with its kind-specific identifier.
///
/// Resolved once when an item is constructed; nothing downstream inspects
/// the kind dynamically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Audiobook,
    Episode { podcast_id: String },
}

/// A playable item: an audiobook or a single podcast episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
}

impl PlayableItem {
    pub fn audiobook(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Audiobook,
        }
    }

    pub fn episode(
        id: impl Into<String>,
        name: impl Into<String>,
        podcast_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Episode {
                podcast_id: podcast_id.into(),
            },
        }
    }
}

/// Lay out per-file durations back-to-back into a track list.
///
/// Input order is preserved; offsets accumulate from zero. Entries with a
/// zero duration are dropped (a track interval must be non-empty).
pub fn assemble_tracks(files: Vec<(PathBuf, String, Duration)>) -> Vec<Track> {
    let mut tracks = Vec::with_capacity(files.len());
    let mut offset = 0.0_f64;

    for (path, title, duration) in files {
        let secs = duration.as_secs_f64();
        if secs <= 0.0 {
            continue;
        }
        tracks.push(Track {
            path,
            title,
            offset,
            duration: secs,
        });
        offset += secs;
    }

    tracks
}

/// Derive one chapter per track, titled after the track.
pub fn chapters_from_tracks(tracks: &[Track]) -> Vec<Chapter> {
    tracks
        .iter()
        .map(|t| Chapter {
            title: t.title.clone(),
            start: t.offset,
            end: t.end(),
        })
        .collect()
}
