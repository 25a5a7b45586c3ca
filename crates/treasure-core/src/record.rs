//! Player record and its store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Durable per-player state: identity plus an append-only play history.
///
/// Field names follow the stored JSON layout (`playerId`, `nickname`,
/// `gameHistory`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Player identifier; empty until the player registers.
    #[serde(default)]
    pub player_id: String,
    /// Display name; empty until the player registers.
    #[serde(default)]
    pub nickname: String,
    /// One entry per completed or aborted run, oldest first.
    #[serde(default)]
    pub game_history: Vec<String>,
}

impl PlayerRecord {
    /// Appends one run result to the history.
    pub fn append_history(&mut self, entry: impl Into<String>) {
        self.game_history.push(entry.into());
    }
}

/// Keyed, durable persistence of the single player record.
#[async_trait]
pub trait PlayerRecordStore: Send + Sync {
    /// Load the stored record, or the zero-value record if none exists.
    async fn load(&self) -> Result<PlayerRecord, DomainError>;

    /// Replace the stored record.
    async fn save(&self, record: &PlayerRecord) -> Result<(), DomainError>;
}
