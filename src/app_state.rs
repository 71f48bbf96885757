//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{Catalog, EventBus};
use crate::service::TriggerEngine;
use crate::simulator::FeedSettings;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Trigger engine for marketing events.
    pub trigger_engine: Arc<TriggerEngine>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Settings for the feed each WebSocket view mounts.
    pub feed: FeedSettings,
    /// Static dashboard content.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Wires a fresh engine to `event_bus` and uses the standard catalog.
    #[must_use]
    pub fn new(event_bus: EventBus, feed: FeedSettings) -> Self {
        Self {
            trigger_engine: Arc::new(TriggerEngine::new(event_bus.clone())),
            event_bus,
            feed,
            catalog: Arc::new(Catalog::standard()),
        }
    }
}
