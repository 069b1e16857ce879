use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
struct SaveFile {
    high_score: u32,
}

/// Persisted high score, backed by a small JSON file.
///
/// Missing or corrupted files load as zero; persistence failures only
/// surface on write, where there is something to lose.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score, defaulting to 0 when the file is
    /// missing or unreadable
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str::<SaveFile>(&text)
                .unwrap_or_default()
                .high_score,
            Err(_) => 0,
        }
    }

    /// Persist a new high score
    pub fn save(&self, high_score: u32) -> Result<()> {
        let json = serde_json::to_string_pretty(&SaveFile { high_score })
            .context("Failed to serialize high score")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_as_zero() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_corrupt_file_loads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json at all {").unwrap();

        let store = HighScoreStore::new(path);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.json"));

        store.save(120).unwrap();
        assert_eq!(store.load(), 120);

        store.save(340).unwrap();
        assert_eq!(store.load(), 340);
    }
}
