//! Shared helpers: boot the full app on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axon_dashboard::api::build_app;
use axon_dashboard::app_state::AppState;
use axon_dashboard::domain::EventBus;
use axon_dashboard::simulator::FeedSettings;

/// Tick period used by the servers under test.
pub const TICK: Duration = Duration::from_millis(50);

/// Starts a server with a fast, seeded feed and returns its address.
#[allow(clippy::panic)]
pub async fn spawn_server() -> SocketAddr {
    let settings = FeedSettings {
        tick_interval: TICK,
        seed: Some(2026),
        ..FeedSettings::default()
    };
    let app = build_app(AppState::new(EventBus::new(64), settings));

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
