//! Route definitions for the Ferry ETA Service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // The single read endpoint consumed by the front-end client
        .route("/ferry_weather", get(handlers::get_ferry_weather))
}
