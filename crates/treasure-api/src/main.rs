//! Treasure hunt API server entry point.

use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use treasure_api::config::AppConfig;
use treasure_api::error::AppError;
use treasure_api::routes;
use treasure_api::state::AppState;
use treasure_core::rng::{DeterministicRng, SystemRng};
use treasure_core::time::{SystemClock, TokioDelay};
use treasure_expedition::application::sequencer::ExpeditionConfig;
use treasure_store::json_file_store::JsonFilePlayerStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting treasure hunt API server");

    let config = AppConfig::from_env()?;
    let addr = config.bind_address()?;

    let store = JsonFilePlayerStore::new(&config.player_record_path);
    tracing::info!(path = %store.path().display(), "player record location");

    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(SystemRng::from_entropy()));
    let expedition = ExpeditionConfig {
        puzzle_max_attempts: config.puzzle_max_attempts,
        ..ExpeditionConfig::default()
    };
    let app_state = AppState::new(
        Arc::new(store),
        Arc::new(SystemClock),
        Arc::new(TokioDelay::scaled(config.timer_scale_percent)),
        rng,
        expedition,
    );

    // TODO: Replace CorsLayer::permissive() with the page's origin once it is served separately.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
