//! # axon-dashboard
//!
//! REST API and WebSocket backend for the AXON AI personalization command
//! center.
//!
//! Every WebSocket connection is one open dashboard with its own simulated
//! decision stream: a bounded log of the 15 most recent customer
//! interaction records, refreshed on a fixed period. Static content
//! (segments, KPIs, campaigns) and the trigger engine are served over REST.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/) ── DashboardView per connection
//!     │                           │
//!     │                           └── FeedStream ─▶ FeedSimulator (simulator/)
//!     ├── Renderers (render/)
//!     │
//!     ├── TriggerEngine (service/)
//!     └── EventBus, EventLog, Catalog (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod service;
pub mod simulator;
pub mod ws;
