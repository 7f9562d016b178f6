use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::PathBuf};

/// The pair handed to the host so a round survives the screen being torn down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedGameState {
    pub score: u32,
    pub remaining_time_ms: u64,
}

/// One-shot handoff file: written on teardown, consumed on the next launch.
pub struct SavedStateStore {
    path: PathBuf,
}

impl SavedStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn put(&self, saved: &SavedGameState) -> Result<()> {
        let serialized = serde_json::to_string_pretty(saved)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write saved state to {}", self.path.display()))
    }

    /// Reads and removes the saved state. The file is removed even when its
    /// contents cannot be parsed.
    pub fn take(&self) -> Result<Option<SavedGameState>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read saved state from {}", self.path.display())
                })
            }
        };

        fs::remove_file(&self.path).with_context(|| {
            format!("Failed to remove saved state at {}", self.path.display())
        })?;

        let saved = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed saved state in {}", self.path.display()))?;
        Ok(Some(saved))
    }
}
