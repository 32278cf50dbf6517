//! Ferry ETA Service - Backend Server
//!
//! Serves per-vessel dock ETA predictions fused from the live position
//! feed, the current weather feed, and the external reasoning service.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ferry_eta_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferry_eta_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Ferry ETA Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Tracking {} vessels across {} registered docks",
        config.fleet.vessels.len(),
        config.docks.len()
    );

    let port = config.server.port;
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
