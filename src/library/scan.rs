use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use lofty::tag::ItemKey;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Track, assemble_tracks};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Assemble the track list of one multi-file item from `dir`.
///
/// Files are ordered by file name (audiobook parts are usually numbered),
/// and their decoded durations become consecutive offsets on the item
/// timeline. Files whose duration cannot be read are skipped; a track with
/// an unknown length would corrupt every offset after it.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut files: Vec<(PathBuf, String, Duration)> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let tagged = match lofty::read_from_path(path) {
            Ok(tagged) => tagged,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable audio file");
                continue;
            }
        };
        let duration = tagged.properties().duration();

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
        }

        files.push((path.to_path_buf(), title, duration));
    }

    // Part ordering comes from file names, not tag order.
    files.sort_by(|a, b| a.0.cmp(&b.0));

    assemble_tracks(files)
}
