//! Marketing events and the trigger executions they produce.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A customer interaction submitted for instant trigger evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketingEvent {
    /// Caller-supplied or generated event identifier.
    pub event_id: String,
    /// Customer the event belongs to.
    pub customer_id: String,
    /// Interaction kind, e.g. `"cart_abandoned"` or `"location_entry"`.
    pub event_type: String,
    /// Originating platform, e.g. `"ios"` or `"web"`.
    pub platform: String,
    /// Free-form attributes.
    pub metadata: HashMap<String, serde_json::Value>,
    /// Time the interaction happened.
    pub timestamp: DateTime<Utc>,
}

/// Delivery channel selected by a campaign rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Mobile push notification.
    Push,
    /// Text message.
    Sms,
    /// Email.
    Email,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Push => "push",
            Self::Sms => "sms",
            Self::Email => "email",
        })
    }
}

/// Outcome of dispatching a trigger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// The dispatcher accepted the action.
    Success,
    /// The dispatcher rejected the action.
    Failed,
}

/// Record of one evaluated and dispatched trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TriggerExecution {
    /// Unique execution identifier.
    pub execution_id: uuid::Uuid,
    /// Event that caused the execution.
    pub event_id: String,
    /// Target customer.
    pub customer_id: String,
    /// Dispatch outcome.
    pub status: ExecutionStatus,
    /// Name of the matched campaign rule.
    pub action_taken: String,
    /// Channel the action was sent through.
    pub target_channel: Channel,
    /// Personalized message body.
    pub personalized_content: Option<String>,
    /// Execution timestamp.
    pub timestamp: DateTime<Utc>,
}
