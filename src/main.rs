//! axon-dashboard server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use axon_dashboard::api;
use axon_dashboard::app_state::AppState;
use axon_dashboard::config::{DashboardConfig, LogFormat};
use axon_dashboard::domain::EventBus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = DashboardConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        tick_ms = config.tick_interval_ms,
        capacity = config.feed_capacity,
        seeded = config.feed_seed.is_some(),
        "starting axon-dashboard"
    );

    // Build application state
    let event_bus = EventBus::new(config.event_bus_capacity);
    let app_state = AppState::new(event_bus, config.feed_settings());

    // Build router
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
