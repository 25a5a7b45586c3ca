//! Routes for the player record.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::{info, instrument};
use treasure_expedition::application::command_handlers;
use treasure_expedition::application::query_handlers::{self, PlayerProfileView};
use treasure_expedition::domain::commands;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for PUT /nickname.
#[derive(Debug, Deserialize)]
pub struct NicknameRequest {
    /// The requested nickname.
    pub nickname: String,
}

/// GET /
async fn get_profile(State(state): State<AppState>) -> Result<Json<PlayerProfileView>, ApiError> {
    let profile = query_handlers::get_player_profile(&*state.store).await?;
    Ok(Json(profile))
}

/// PUT /nickname
///
/// Rejected while a run is in flight, since the run writes the same record
/// when it finishes. The record stays held until the write is done.
#[instrument(skip(state, request))]
async fn set_nickname(
    State(state): State<AppState>,
    Json(request): Json<NicknameRequest>,
) -> Result<Json<PlayerProfileView>, ApiError> {
    let _hold = state.host.hold_record()?;

    let command = commands::RegisterPlayer {
        correlation_id: Uuid::new_v4(),
        player_id: Uuid::new_v4(),
        nickname: request.nickname,
    };

    info!(correlation_id = %command.correlation_id, "handling register_player command");

    command_handlers::handle_register_player(&command, &*state.store).await?;
    let profile = query_handlers::get_player_profile(&*state.store).await?;
    Ok(Json(profile))
}

/// Returns the router for the player record.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/nickname", put(set_nickname))
}
