//! Trigger request and response DTOs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::MarketingEvent;

/// Request body for `POST /trigger/execute` and `POST /trigger/async-event`.
///
/// Missing text fields deserialize as empty strings and are rejected by
/// validation with a 400.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MarketingEventRequest {
    /// Event identifier. A UUID v4 is generated when omitted.
    #[serde(default)]
    pub event_id: Option<String>,
    /// Customer the event belongs to.
    #[serde(default)]
    pub customer_id: String,
    /// Interaction kind, e.g. `"cart_abandoned"`.
    #[serde(default)]
    pub event_type: String,
    /// Originating platform, e.g. `"ios"`.
    #[serde(default)]
    pub platform: String,
    /// Free-form attributes.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Interaction time (ISO-8601). Defaults to now.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MarketingEventRequest {
    /// Fills defaults and converts into a domain event.
    #[must_use]
    pub fn into_event(self) -> MarketingEvent {
        MarketingEvent {
            event_id: self
                .event_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            customer_id: self.customer_id,
            event_type: self.event_type,
            platform: self.platform,
            metadata: self.metadata,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }
}

/// Response body for `POST /trigger/async-event`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AcceptedResponse {
    /// Always `"accepted"`.
    pub status: String,
    /// Identifier of the queued event.
    pub event_id: String,
}
