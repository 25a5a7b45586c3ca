//! Query handlers for the expedition context.

use serde::Serialize;
use treasure_core::error::DomainError;
use treasure_core::record::PlayerRecordStore;

/// Read-only view of the player record.
#[derive(Debug, Serialize)]
pub struct PlayerProfileView {
    /// The player identifier; empty before registration.
    pub player_id: String,
    /// The nickname; empty before registration.
    pub nickname: String,
    /// Every recorded run, oldest first.
    pub game_history: Vec<String>,
    /// Number of runs recorded.
    pub runs_played: usize,
}

/// Retrieves the player profile. A missing record reads as the zero-value
/// profile.
///
/// # Errors
///
/// Returns `DomainError` if the store cannot be read.
pub async fn get_player_profile(
    store: &dyn PlayerRecordStore,
) -> Result<PlayerProfileView, DomainError> {
    let record = store.load().await?;
    Ok(PlayerProfileView {
        runs_played: record.game_history.len(),
        player_id: record.player_id,
        nickname: record.nickname,
        game_history: record.game_history,
    })
}
