//! Remembered per-item playback rates.
//!
//! Listeners speed audiobooks and podcasts up differently; the rate an item
//! was last played at is remembered and restored on the next load.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::library::{ItemKind, PlayableItem};

/// Key a remembered rate is stored under.
///
/// Resolved once at load time from the item's kind: audiobooks remember a
/// rate per book, episodes one per podcast/episode pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateKey {
    item: String,
    episode: Option<String>,
}

impl RateKey {
    pub fn for_item(item: &PlayableItem) -> Self {
        match &item.kind {
            ItemKind::Audiobook => Self {
                item: item.id.clone(),
                episode: None,
            },
            ItemKind::Episode { podcast_id } => Self {
                item: podcast_id.clone(),
                episode: Some(item.id.clone()),
            },
        }
    }

    fn storage_key(&self) -> String {
        match &self.episode {
            Some(e) => format!("{}/{}", self.item, e),
            None => self.item.clone(),
        }
    }
}

pub trait RateStore: Send {
    fn rate_for(&self, key: &RateKey) -> Option<f32>;
    fn set_rate(&mut self, key: &RateKey, rate: f32);
}

/// In-memory store; rates last for the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    rates: HashMap<String, f32>,
}

impl RateStore for MemoryRateStore {
    fn rate_for(&self, key: &RateKey) -> Option<f32> {
        self.rates.get(&key.storage_key()).copied()
    }

    fn set_rate(&mut self, key: &RateKey, rate: f32) {
        self.rates.insert(key.storage_key(), rate);
    }
}

/// Store backed by a flat TOML table (`"key" = rate`), rewritten on every
/// update. Updates are rare (a user adjusting the speed), so no buffering.
#[derive(Debug)]
pub struct FileRateStore {
    path: PathBuf,
    rates: HashMap<String, f32>,
}

impl FileRateStore {
    /// Open the store at `path`; a missing or unparsable file starts empty.
    pub fn open(path: PathBuf) -> Self {
        let rates = fs::read_to_string(&path)
            .ok()
            .and_then(|body| toml::from_str::<HashMap<String, f32>>(&body).ok())
            .unwrap_or_default();

        Self { path, rates }
    }

    fn persist(&self) {
        let body = match toml::to_string(&self.rates) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to serialize playback rates");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(&self.path, body) {
            warn!(path = %self.path.display(), error = %e, "failed to persist playback rates");
        }
    }
}

impl RateStore for FileRateStore {
    fn rate_for(&self, key: &RateKey) -> Option<f32> {
        self.rates.get(&key.storage_key()).copied()
    }

    fn set_rate(&mut self, key: &RateKey, rate: f32) {
        self.rates.insert(key.storage_key(), rate);
        self.persist();
    }
}

/// Default location of the rate file, next to the config.
pub fn default_rates_path() -> Option<PathBuf> {
    crate::config::resolve_config_path().map(|p| p.with_file_name("rates.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_key() -> RateKey {
        RateKey::for_item(&PlayableItem::audiobook("book-1", "A Book"))
    }

    #[test]
    fn keys_separate_audiobooks_from_episodes() {
        let book = book_key();
        let episode = RateKey::for_item(&PlayableItem::episode("ep-1", "Ep", "pod-1"));

        assert_eq!(book.storage_key(), "book-1");
        assert_eq!(episode.storage_key(), "pod-1/ep-1");
    }

    #[test]
    fn memory_store_roundtrips() {
        let mut store = MemoryRateStore::default();
        let key = book_key();

        assert_eq!(store.rate_for(&key), None);
        store.set_rate(&key, 1.4);
        assert_eq!(store.rate_for(&key), Some(1.4));
    }

    #[test]
    fn episodes_of_one_podcast_remember_rates_independently() {
        let mut store = MemoryRateStore::default();
        let a = RateKey::for_item(&PlayableItem::episode("ep-1", "One", "pod-1"));
        let b = RateKey::for_item(&PlayableItem::episode("ep-2", "Two", "pod-1"));

        store.set_rate(&a, 1.2);
        store.set_rate(&b, 2.0);
        assert_eq!(store.rate_for(&a), Some(1.2));
        assert_eq!(store.rate_for(&b), Some(2.0));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.toml");
        let key = book_key();

        let mut store = FileRateStore::open(path.clone());
        store.set_rate(&key, 1.75);

        let reopened = FileRateStore::open(path);
        assert_eq!(reopened.rate_for(&key), Some(1.75));
    }

    #[test]
    fn file_store_ignores_garbage_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let store = FileRateStore::open(path);
        assert_eq!(store.rate_for(&book_key()), None);
    }
}
