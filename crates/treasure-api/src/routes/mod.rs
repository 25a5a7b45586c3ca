//! HTTP routes.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod player;
pub mod run;

/// The full route tree, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/runs", run::router())
        .nest("/api/v1/player", player::router())
}
