use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const DEFAULT_INITIAL_DURATION_MS: u64 = 20_000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub initial_duration_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_duration_ms: DEFAULT_INITIAL_DURATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<()> {
        if self.initial_duration_ms == 0 {
            bail!("initialDurationMs must be greater than zero");
        }
        if self.tick_interval_ms == 0 {
            bail!("tickIntervalMs must be greater than zero");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: GameSettings,
}

impl SettingsStore {
    /// Loads settings from `path`, writing the defaults there when the file
    /// does not exist yet. Unparseable files fall back to the defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring malformed settings in {}: {}",
                    path.display(),
                    err
                );
                GameSettings::default()
            })
        } else {
            let data = GameSettings::default();
            persist(&path, &data)?;
            data
        };

        data.validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        Ok(Self { path, data })
    }

    pub fn game(&self) -> GameSettings {
        self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn persist(path: &Path, data: &GameSettings) -> Result<()> {
    let serialized = serde_json::to_string_pretty(data)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write settings to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();

        assert_eq!(store.game(), GameSettings::default());
        let written: GameSettings =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, GameSettings::default());
    }

    #[test]
    fn reads_partial_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "initialDurationMs": 5000 }"#).unwrap();

        let store = SettingsStore::new(path).unwrap();

        assert_eq!(store.game().initial_duration_ms, 5_000);
        assert_eq!(store.game().tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path).unwrap();

        assert_eq!(store.game(), GameSettings::default());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "tickIntervalMs": 0 }"#).unwrap();

        assert!(SettingsStore::new(path).is_err());
    }
}
