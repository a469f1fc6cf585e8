//! Jokebox HTTP/JSON Gateway.
//!
//! Exposes the joke service as a small REST API:
//!
//! | Method | Path                   | Success |
//! |--------|------------------------|---------|
//! | POST   | `{base}/jokes`         | 201     |
//! | GET    | `{base}/jokes`         | 200     |
//! | GET    | `{base}/jokes/random`  | 200     |
//! | GET    | `{base}/jokes/{id}`    | 200     |
//!
//! plus `GET {base}` (greeting) and `GET /health`.

pub mod config;
pub mod error;
pub mod json;
pub mod routes;

pub use config::{Args, ConfigError, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::Router;
use jokebox_core::{JokeService, JokeStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Joke service over the configured store.
    pub service: JokeService,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn JokeStore>, config: GatewayConfig) -> Self {
        Self {
            service: JokeService::new(store),
            config,
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mount_path = state.config.mount_path().to_string();
    let jokes = if mount_path.is_empty() {
        routes::jokes::routes()
    } else {
        Router::new().nest(&mount_path, routes::jokes::routes())
    };

    Router::new()
        .merge(routes::health::routes())
        .merge(jokes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
