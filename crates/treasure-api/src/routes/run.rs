//! Routes for starting and driving the hosted run.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{info, instrument};
use treasure_core::presentation::PresentationSink;
use treasure_expedition::application::sequencer::{Expedition, Sequencer};

use crate::error::ApiError;
use crate::host::RunView;
use crate::state::AppState;

/// Request body for POST /current/choice.
#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    /// The label of the selected option.
    pub label: String,
}

/// Request body for POST /current/answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The confirmed text input.
    pub text: String,
}

/// POST /
///
/// Starts a fresh run in the background. Any finished run is replaced.
#[instrument(skip(state))]
async fn start_run(State(state): State<AppState>) -> Result<(StatusCode, Json<RunView>), ApiError> {
    state.host.begin(state.clock.now())?;

    let sink: Arc<dyn PresentationSink> = Arc::new(state.host.sink());
    let expedition = Expedition::standard(
        &sink,
        &state.delay,
        &state.rng,
        state.expedition.clone(),
    );
    let mut sequencer = Sequencer::new(expedition, sink, Arc::clone(&state.store));

    let host = state.host.clone();
    let clock = Arc::clone(&state.clock);
    tokio::spawn(async move {
        let result = sequencer.run_game().await;
        host.finish(result, clock.now());
    });

    info!("run started");
    Ok((StatusCode::ACCEPTED, Json(state.host.view())))
}

/// GET /current
async fn current_run(State(state): State<AppState>) -> Json<RunView> {
    Json(state.host.view())
}

/// POST /current/choice
#[instrument(skip(state, request), fields(label = %request.label))]
async fn choose(
    State(state): State<AppState>,
    Json(request): Json<ChoiceRequest>,
) -> Result<Json<RunView>, ApiError> {
    state.host.choose(&request.label)?;
    Ok(Json(state.host.view()))
}

/// POST /current/answer
#[instrument(skip(state, request))]
async fn answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<RunView>, ApiError> {
    state.host.answer(&request.text)?;
    Ok(Json(state.host.view()))
}

/// Returns the router for the hosted run.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_run))
        .route("/current", get(current_run))
        .route("/current/choice", post(choose))
        .route("/current/answer", post(answer))
}
