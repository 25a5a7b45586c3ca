//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use treasure_test_support::{MemoryRecordStore, SequenceRng};

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let state = common::build_test_state(
        Arc::new(MemoryRecordStore::new()),
        SequenceRng::new(vec![]),
    );
    let app = common::build_test_app(state);

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "treasure-api");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let state = common::build_test_state(
        Arc::new(MemoryRecordStore::new()),
        SequenceRng::new(vec![]),
    );
    let app = common::build_test_app(state);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
