use std::env;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::library::{self, PlayableItem};
use crate::playback::{Player, RodioEngine};
use crate::prefs::{self, FileRateStore, MemoryRateStore, RateStore};
use crate::reporter::LogReporter;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = settings::load_settings();

    let dir = env::args()
        .nth(1)
        .ok_or("usage: legato <item-directory> [start-seconds]")?;
    let start_time: f64 = env::args()
        .nth(2)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(0.0);
    let dir = Path::new(&dir);

    let tracks = library::scan(dir, &settings.library);
    if tracks.is_empty() {
        return Err(format!("no playable audio found in {}", dir.display()).into());
    }
    let chapters = library::chapters_from_tracks(&tracks);

    let name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("item")
        .to_string();
    let item = PlayableItem::audiobook(name.clone(), name);

    let rates: Box<dyn RateStore> = match prefs::default_rates_path() {
        Some(path) => Box::new(FileRateStore::open(path)),
        None => Box::new(MemoryRateStore::default()),
    };

    let engine = RodioEngine::new()?;
    let player = Player::new(Box::new(engine), rates, settings.playback.clone());

    player.load(item, tracks, chapters, start_time, Box::new(LogReporter))?;

    event_loop::run(&player)
}
