//! Events broadcast to every connected dashboard view.
//!
//! Feed updates are private to the view that owns the simulator; only
//! process-wide activity (trigger executions) travels through the
//! [`super::EventBus`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::trigger::TriggerExecution;

/// Broadcast event discriminator used for WebSocket topic filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardEventKind {
    /// See [`DashboardEvent::TriggerExecuted`].
    TriggerExecuted,
    /// See [`DashboardEvent::TriggerAccepted`].
    TriggerAccepted,
}

impl DashboardEventKind {
    /// Every kind, in topic listing order.
    pub const ALL: [Self; 2] = [Self::TriggerExecuted, Self::TriggerAccepted];

    /// Returns the topic name (e.g. `"trigger_executed"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TriggerExecuted => "trigger_executed",
            Self::TriggerAccepted => "trigger_accepted",
        }
    }

    /// Looks up a kind by topic name.
    #[must_use]
    pub fn from_topic(topic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == topic)
    }
}

/// Process-wide dashboard activity.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// A trigger was evaluated and dispatched.
    TriggerExecuted {
        /// The execution record.
        execution: TriggerExecution,
        /// Running total shown on the "Real-Time Triggers Executed" card.
        triggers_executed: u64,
    },

    /// A marketing event was queued for background evaluation.
    TriggerAccepted {
        /// Identifier of the queued event.
        event_id: String,
        /// Acceptance timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    /// Returns the topic kind of this event.
    #[must_use]
    pub const fn kind(&self) -> DashboardEventKind {
        match self {
            Self::TriggerExecuted { .. } => DashboardEventKind::TriggerExecuted,
            Self::TriggerAccepted { .. } => DashboardEventKind::TriggerAccepted,
        }
    }
}
