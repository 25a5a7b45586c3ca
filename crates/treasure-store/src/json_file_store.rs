//! JSON-file implementation of the `PlayerRecordStore` trait.
//!
//! The record lives in a single JSON document. Writes go to a sibling
//! temporary file first and are then renamed over the original, so a crash
//! mid-write never leaves a truncated record behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use treasure_core::error::DomainError;
use treasure_core::record::{PlayerRecord, PlayerRecordStore};

/// File-backed player record store.
#[derive(Debug, Clone)]
pub struct JsonFilePlayerStore {
    path: PathBuf,
}

impl JsonFilePlayerStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PlayerRecordStore for JsonFilePlayerStore {
    async fn load(&self) -> Result<PlayerRecord, DomainError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no player record yet");
                return Ok(PlayerRecord::default());
            }
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "player record is corrupt");
            DomainError::Infrastructure(format!("player record deserialization failed: {e}"))
        })
    }

    async fn save(&self, record: &PlayerRecord) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(record).map_err(|e| {
            DomainError::Infrastructure(format!("player record serialization failed: {e}"))
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Infrastructure(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json).await.map_err(|e| {
            DomainError::Infrastructure(format!("failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            DomainError::Infrastructure(format!(
                "failed to replace {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(
            path = %self.path.display(),
            runs = record.game_history.len(),
            "player record saved"
        );
        Ok(())
    }
}
