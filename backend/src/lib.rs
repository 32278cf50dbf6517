//! Ferry ETA Service - backend library
//!
//! Fuses live vessel-position telemetry with current weather observations
//! to produce per-vessel ETA predictions at the nearest known dock,
//! served from a single read endpoint.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::{EtaEstimator, PositionFeedClient, ReasoningClient, WeatherFeedClient};
use services::eta_policy::SpeedTable;
use services::{EtaPipeline, GeoIndex};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<EtaPipeline>,
}

impl AppState {
    /// Wire the pipeline from configuration. Anything that can be rejected
    /// here (empty dock registry, unbuildable clients) fails at startup
    /// instead of per-request.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let geo = Arc::new(GeoIndex::new(config.docks.clone())?);
        let speeds = SpeedTable::from(&config.speeds);

        let positions = PositionFeedClient::new(&config.positions)?;
        let weather = WeatherFeedClient::new(&config.weather)?;
        let estimator: Arc<dyn EtaEstimator> =
            Arc::new(ReasoningClient::new(&config.reasoning, &speeds)?);

        let pipeline = EtaPipeline::new(
            positions,
            weather,
            estimator,
            geo,
            config.fleet.vessels.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS configuration: the configured origins, or any origin when none are
/// configured.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint
async fn root() -> &'static str {
    "Ferry ETA Service API v1.0"
}
