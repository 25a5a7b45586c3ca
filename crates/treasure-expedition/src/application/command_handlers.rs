//! Command handlers for the expedition context.
//!
//! Each handler performs a full read-modify-write against the record store.
//! The sequencer is the only writer in-process and never runs two
//! expeditions at once, so no locking is done here.

use tracing::{info, instrument};
use treasure_core::error::DomainError;
use treasure_core::record::{PlayerRecord, PlayerRecordStore};

use crate::domain::commands::{RecordRunResult, RegisterPlayer};

/// Longest nickname accepted, in characters.
pub const MAX_NICKNAME_CHARS: usize = 32;

/// Handles the `RecordRunResult` command: loads the record, appends the
/// entry to the play history and saves it back.
///
/// # Errors
///
/// Returns `DomainError` if loading or saving the record fails.
#[instrument(skip(command, store), fields(correlation_id = %command.correlation_id))]
pub async fn handle_record_run_result(
    command: &RecordRunResult,
    store: &dyn PlayerRecordStore,
) -> Result<PlayerRecord, DomainError> {
    let mut record = store.load().await?;
    record.append_history(command.entry.clone());
    store.save(&record).await?;

    info!(runs = record.game_history.len(), "run recorded in history");
    Ok(record)
}

/// Handles the `RegisterPlayer` command: sets the nickname and assigns the
/// player id on first registration. The history is left untouched.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the nickname is blank or longer than
/// `MAX_NICKNAME_CHARS`, or `DomainError` if the store fails.
#[instrument(skip(command, store), fields(correlation_id = %command.correlation_id))]
pub async fn handle_register_player(
    command: &RegisterPlayer,
    store: &dyn PlayerRecordStore,
) -> Result<PlayerRecord, DomainError> {
    let nickname = command.nickname.trim();
    if nickname.is_empty() {
        return Err(DomainError::Validation("nickname must not be blank".to_owned()));
    }
    if nickname.chars().count() > MAX_NICKNAME_CHARS {
        return Err(DomainError::Validation(format!(
            "nickname must be at most {MAX_NICKNAME_CHARS} characters"
        )));
    }

    let mut record = store.load().await?;
    if record.player_id.is_empty() {
        record.player_id = command.player_id.to_string();
    }
    nickname.clone_into(&mut record.nickname);
    store.save(&record).await?;

    info!(player_id = %record.player_id, "player registered");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use treasure_core::error::DomainError;
    use treasure_core::record::PlayerRecord;
    use treasure_test_support::{FailingRecordStore, MemoryRecordStore};
    use uuid::Uuid;

    use crate::application::command_handlers::{handle_record_run_result, handle_register_player};
    use crate::domain::commands::{RecordRunResult, RegisterPlayer};

    fn record_command(entry: &str) -> RecordRunResult {
        RecordRunResult {
            correlation_id: Uuid::new_v4(),
            entry: entry.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_record_run_result_appends_and_saves() {
        // Arrange
        let store = MemoryRecordStore::new();

        // Act
        let record = handle_record_run_result(&record_command("挖掘成功，找到了宝藏！"), &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(record.game_history, vec!["挖掘成功，找到了宝藏！".to_owned()]);
        assert_eq!(store.record(), record);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_record_run_result_keeps_earlier_entries() {
        let store = MemoryRecordStore::with_record(PlayerRecord {
            player_id: "p".to_owned(),
            nickname: "阿宝".to_owned(),
            game_history: vec!["第一次".to_owned()],
        });

        handle_record_run_result(&record_command("第二次"), &store)
            .await
            .unwrap();

        let record = store.record();
        assert_eq!(record.game_history, vec!["第一次".to_owned(), "第二次".to_owned()]);
        assert_eq!(record.nickname, "阿宝");
    }

    #[tokio::test]
    async fn test_record_run_result_propagates_store_failure() {
        let result = handle_record_run_result(&record_command("x"), &FailingRecordStore).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_register_player_assigns_id_once() {
        // Arrange
        let store = MemoryRecordStore::new();
        let first_id = Uuid::new_v4();
        let first = RegisterPlayer {
            correlation_id: Uuid::new_v4(),
            player_id: first_id,
            nickname: "  寻宝人 ".to_owned(),
        };
        let second = RegisterPlayer {
            correlation_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            nickname: "探险家".to_owned(),
        };

        // Act
        handle_register_player(&first, &store).await.unwrap();
        let record = handle_register_player(&second, &store).await.unwrap();

        // Assert
        assert_eq!(record.player_id, first_id.to_string());
        assert_eq!(record.nickname, "探险家");
        assert!(record.game_history.is_empty());
    }

    #[tokio::test]
    async fn test_register_player_rejects_blank_nickname() {
        let store = MemoryRecordStore::new();
        let command = RegisterPlayer {
            correlation_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            nickname: "   ".to_owned(),
        };

        let result = handle_register_player(&command, &store).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_register_player_rejects_long_nickname() {
        let store = MemoryRecordStore::new();
        let command = RegisterPlayer {
            correlation_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            nickname: "宝".repeat(33),
        };

        let result = handle_register_player(&command, &store).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
