//! Integration tests for playing a run over HTTP.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use treasure_test_support::{MemoryRecordStore, SequenceRng};

#[tokio::test]
async fn test_full_run_completes_and_records_history() {
    // Arrange
    let store = Arc::new(MemoryRecordStore::new());
    let state = common::build_test_state(store.clone(), SequenceRng::new(vec![1]));

    // Act
    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), "/api/v1/runs").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["status"], "running");

    common::choose(&state, "继续向前").await;
    common::choose(&state, "木筏").await;
    common::answer(&state, "太阳").await;
    common::choose(&state, "交出密码").await;
    let view = common::wait_for_turn(&state).await;

    // Assert
    assert_eq!(view["status"], "completed");
    assert_eq!(view["outcome"]["status"], "completed");
    assert_eq!(view["outcome"]["message"], "挖掘成功，找到了宝藏！");
    assert_eq!(view["can_restart"], false);
    assert_eq!(view["background"], "宝藏.jpg");
    let transcript: Vec<&str> = view["transcript"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|line| line.as_str())
        .collect();
    assert!(transcript.iter().any(|line| line.contains("宝藏答案：太阳")));
    assert!(transcript.iter().any(|line| line.contains("secretpassword")));
    assert_eq!(store.record().game_history, vec!["挖掘成功，找到了宝藏！".to_owned()]);
}

#[tokio::test]
async fn test_wrong_puzzle_answer_keeps_prompt_open() {
    // Arrange
    let state = common::build_test_state(
        Arc::new(MemoryRecordStore::new()),
        SequenceRng::new(vec![3]),
    );
    common::post_empty(common::build_test_app(state.clone()), "/api/v1/runs").await;
    common::choose(&state, "继续向前").await;
    common::choose(&state, "木筏").await;

    // Act
    common::answer(&state, "月亮").await;
    let view = common::wait_for_turn(&state).await;

    // Assert
    assert_eq!(view["status"], "running");
    assert_eq!(view["prompt"]["kind"], "text_input");
    assert!(
        view["transcript"]
            .as_array()
            .unwrap()
            .iter()
            .any(|line| line == "谜题答案错误，请重试。")
    );
}

#[tokio::test]
async fn test_aborted_run_records_reason_and_allows_restart() {
    // Arrange
    let store = Arc::new(MemoryRecordStore::new());
    let state = common::build_test_state(store.clone(), SequenceRng::new(vec![1, 1]));
    common::post_empty(common::build_test_app(state.clone()), "/api/v1/runs").await;
    common::choose(&state, "继续向前").await;

    // Act
    common::choose(&state, "绳索").await;
    let view = common::wait_for_turn(&state).await;

    // Assert
    assert_eq!(view["status"], "aborted");
    assert_eq!(view["outcome"]["message"], "绳索断裂，掉进河里，寻宝失败。");
    assert_eq!(view["can_restart"], true);
    let last_line = view["transcript"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last_line, "任务失败：绳索断裂，掉进河里，寻宝失败。");
    assert_eq!(
        store.record().game_history,
        vec!["绳索断裂，掉进河里，寻宝失败。".to_owned()]
    );

    // Restart clears the board and the history keeps growing.
    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), "/api/v1/runs").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["status"], "running");
    common::choose(&state, "放弃").await;
    let view = common::wait_for_turn(&state).await;
    assert_eq!(view["status"], "aborted");
    assert_eq!(store.record().game_history.len(), 2);
}

#[tokio::test]
async fn test_forest_trap_asks_to_rest() {
    let state = common::build_test_state(
        Arc::new(MemoryRecordStore::new()),
        SequenceRng::new(vec![2]),
    );
    common::post_empty(common::build_test_app(state.clone()), "/api/v1/runs").await;
    common::choose(&state, "继续向前").await;

    let view = common::wait_for_turn(&state).await;

    assert_eq!(
        view["prompt"]["options"],
        serde_json::json!(["休整后继续", "放弃"])
    );
}

#[tokio::test]
async fn test_choice_after_run_ended_returns_410() {
    // Arrange
    let state = common::build_test_state(
        Arc::new(MemoryRecordStore::new()),
        SequenceRng::new(vec![]),
    );
    common::post_empty(common::build_test_app(state.clone()), "/api/v1/runs").await;
    common::choose(&state, "放弃").await;
    let view = common::wait_for_turn(&state).await;
    assert_eq!(view["status"], "aborted");

    // Act
    let (status, json) = common::send_json(
        common::build_test_app(state.clone()),
        "POST",
        "/api/v1/runs/current/choice",
        &serde_json::json!({ "label": "继续向前" }),
    )
    .await;
    let (answer_status, _) = common::send_json(
        common::build_test_app(state),
        "POST",
        "/api/v1/runs/current/answer",
        &serde_json::json!({ "text": "太阳" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(json["error"], "prompt_gone");
    assert_eq!(answer_status, StatusCode::GONE);
}
