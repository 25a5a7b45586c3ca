//! Commands for the expedition context.

use uuid::Uuid;

/// Command to set the player's nickname.
#[derive(Debug, Clone)]
pub struct RegisterPlayer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier to assign if the record has none yet.
    pub player_id: Uuid,
    /// The requested nickname.
    pub nickname: String,
}

/// Command to append a finished run to the play history.
#[derive(Debug, Clone)]
pub struct RecordRunResult {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The history entry: final message or failure reason.
    pub entry: String,
}
