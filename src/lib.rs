mod about;
pub mod game;
pub mod settings;
mod terminal;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use game::SavedStateStore;
use settings::SettingsStore;

/// Round length used when `TIMEFIGHTER_DEBUG` is set.
const DEBUG_ROUND_MS: u64 = 5_000;

fn data_dir() -> PathBuf {
    std::env::var_os("TIMEFIGHTER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".timefighter"))
}

fn debug_mode() -> bool {
    std::env::var("TIMEFIGHTER_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub async fn run() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Timefighter starting up...");

    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

    let settings_store = SettingsStore::new(data_dir.join("settings.json"))?;
    log::info!("Loaded settings from {}", settings_store.path().display());

    let mut settings = settings_store.game();
    if debug_mode() {
        log::info!("Debug mode: rounds last {} ms", DEBUG_ROUND_MS);
        settings.initial_duration_ms = DEBUG_ROUND_MS;
    }

    let saved_store = SavedStateStore::new(data_dir.join("saved_state.json"));
    terminal::run_terminal(settings, &saved_store).await
}
