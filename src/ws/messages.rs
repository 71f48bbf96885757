//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EventId, View};
use crate::error::DashboardError;
use crate::render::FeedFrame;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server event with a fresh id.
    #[must_use]
    pub fn event<T: Serialize>(payload: &T) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload)
    }

    /// Builds a response to the command with id `id`.
    #[must_use]
    pub fn response<T: Serialize>(id: String, payload: &T) -> Self {
        Self::new(id, WsMessageType::Response, payload)
    }

    /// Builds an error reply carrying the error's code and message.
    #[must_use]
    pub fn error(id: String, err: &DashboardError) -> Self {
        Self::new(id, WsMessageType::Error, &err.to_body().error)
    }

    fn new<T: Serialize>(id: String, msg_type: WsMessageType, payload: &T) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload: serde_json::to_value(payload).unwrap_or_default(),
        }
    }

    /// Serializes the envelope for the wire.
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Switch the view's route.
    Navigate {
        /// Route key, e.g. `"campaigns"`.
        view: String,
    },
    /// Render the current feed contents.
    GetFeed,
    /// Subscribe to bus topics. Use `["*"]` for all topics.
    Subscribe {
        /// Topic names.
        topics: Vec<String>,
    },
    /// Unsubscribe from bus topics.
    Unsubscribe {
        /// Topic names.
        topics: Vec<String>,
    },
}

/// Events that belong to a single connection's view.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// The feed ticked.
    FeedUpdate {
        /// Snapshot revision.
        revision: u64,
        /// Record inserted by this tick.
        inserted: EventId,
        /// Record evicted by this tick, if the log was full.
        evicted: Option<EventId>,
        /// Rendered feed panel.
        frame: FeedFrame,
    },
    /// The route changed.
    ViewChanged {
        /// New route.
        view: View,
        /// Whether the feed is running on the new route.
        feed_mounted: bool,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_payload() {
        let nav = serde_json::json!({"command": "navigate", "view": "campaigns"});
        let Ok(WsCommand::Navigate { view }) = serde_json::from_value(nav) else {
            panic!("navigate parses");
        };
        assert_eq!(view, "campaigns");

        let get = serde_json::json!({"command": "get_feed"});
        assert!(matches!(serde_json::from_value(get), Ok(WsCommand::GetFeed)));

        let sub = serde_json::json!({"command": "subscribe", "topics": ["*"]});
        let Ok(WsCommand::Subscribe { topics }) = serde_json::from_value(sub) else {
            panic!("subscribe parses");
        };
        assert_eq!(topics, vec!["*"]);
    }

    #[test]
    fn error_envelope_carries_code() {
        let msg = WsMessage::error("c-1".into(), &DashboardError::InvalidRequest("x".into()));
        assert_eq!(msg.msg_type, WsMessageType::Error);
        assert_eq!(msg.payload.get("code"), Some(&serde_json::json!(1001)));
        let wire = msg.encode().unwrap_or_default();
        assert!(wire.contains("\"type\":\"error\""));
    }

    #[test]
    fn view_changed_is_tagged() {
        let msg = WsMessage::event(&ViewEvent::ViewChanged {
            view: View::Campaigns,
            feed_mounted: false,
        });
        assert_eq!(
            msg.payload.get("event_type"),
            Some(&serde_json::json!("view_changed"))
        );
        assert_eq!(msg.payload.get("view"), Some(&serde_json::json!("campaigns")));
    }
}
