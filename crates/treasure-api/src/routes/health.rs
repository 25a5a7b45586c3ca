//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body of a liveness reply.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server answers.
    pub status: &'static str,
    /// Crate name of the running server.
    pub service: &'static str,
    /// Crate version of the running server.
    pub version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Returns the liveness router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
