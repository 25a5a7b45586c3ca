//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use treasure_core::record::PlayerRecordStore;
use treasure_core::rng::DeterministicRng;
use treasure_expedition::application::sequencer::ExpeditionConfig;
use treasure_test_support::{FixedClock, InstantDelay, SequenceRng};
use tower::ServiceExt;

use treasure_api::routes;
use treasure_api::state::AppState;

/// Build application state with instant timers and a scripted RNG.
pub fn build_test_state(store: Arc<dyn PlayerRecordStore>, rng: SequenceRng) -> AppState {
    let clock = Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ));
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(rng));
    AppState::new(
        store,
        clock,
        Arc::new(InstantDelay::new()),
        rng,
        ExpeditionConfig::default(),
    )
}

/// Build the full app router over `state`. Uses the same route tree as
/// `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    routes::router().with_state(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a request with a JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Poll the current run until it shows a prompt or stops running.
pub async fn wait_for_turn(state: &AppState) -> serde_json::Value {
    for _ in 0..1000 {
        let (status, json) = get_json(build_test_app(state.clone()), "/api/v1/runs/current").await;
        assert_eq!(status, StatusCode::OK);
        if !json["prompt"].is_null() || json["status"] != "running" {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("run made no progress");
}

/// Wait for the next prompt and answer it with `label`.
pub async fn choose(state: &AppState, label: &str) {
    let view = wait_for_turn(state).await;
    assert_eq!(view["prompt"]["kind"], "choice", "expected a choice, got {view}");
    let (status, _) = send_json(
        build_test_app(state.clone()),
        "POST",
        "/api/v1/runs/current/choice",
        &serde_json::json!({ "label": label }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// Wait for the next prompt and answer it with `text`.
pub async fn answer(state: &AppState, text: &str) {
    let view = wait_for_turn(state).await;
    assert_eq!(view["prompt"]["kind"], "text_input", "expected text input, got {view}");
    let (status, _) = send_json(
        build_test_app(state.clone()),
        "POST",
        "/api/v1/runs/current/answer",
        &serde_json::json!({ "text": text }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
