//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams one live decision feed per
//! connection and accepts navigation and subscription commands.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
