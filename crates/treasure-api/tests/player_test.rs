//! Integration tests for the player record endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use treasure_store::json_file_store::JsonFilePlayerStore;
use treasure_test_support::SequenceRng;

#[tokio::test]
async fn test_nickname_round_trip_through_json_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFilePlayerStore::new(dir.path().join("player.json")));
    let state = common::build_test_state(store, SequenceRng::new(vec![]));

    // Act
    let (status, _) = common::send_json(
        common::build_test_app(state.clone()),
        "PUT",
        "/api/v1/player/nickname",
        &serde_json::json!({ "nickname": "寻宝人" }),
    )
    .await;
    let (get_status, json) =
        common::get_json(common::build_test_app(state), "/api/v1/player").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get_status, StatusCode::OK);
    assert_eq!(json["nickname"], "寻宝人");
    assert_eq!(json["runs_played"], 0);
    let raw = std::fs::read_to_string(dir.path().join("player.json")).unwrap();
    assert!(raw.contains("\"nickname\": \"寻宝人\""));
}

#[tokio::test]
async fn test_second_registration_keeps_player_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFilePlayerStore::new(dir.path().join("player.json")));
    let state = common::build_test_state(store, SequenceRng::new(vec![]));

    let (_, first) = common::send_json(
        common::build_test_app(state.clone()),
        "PUT",
        "/api/v1/player/nickname",
        &serde_json::json!({ "nickname": "寻宝人" }),
    )
    .await;
    let (_, second) = common::send_json(
        common::build_test_app(state),
        "PUT",
        "/api/v1/player/nickname",
        &serde_json::json!({ "nickname": "探险家" }),
    )
    .await;

    assert_eq!(first["player_id"], second["player_id"]);
    assert_eq!(second["nickname"], "探险家");
}
