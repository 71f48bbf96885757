//! The feed record: the stable contract between simulator and renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CustomerId, EventId};

/// Category of a simulated customer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Customer viewed a product page.
    ViewProduct,
    /// Customer added an item to the cart.
    AddToCart,
    /// Customer ran a search.
    SearchQuery,
    /// Customer clicked a link in a marketing email.
    EmailClick,
}

impl EventType {
    /// Every event type, in the order the generator samples from.
    pub const ALL: [Self; 4] = [
        Self::ViewProduct,
        Self::AddToCart,
        Self::SearchQuery,
        Self::EmailClick,
    ];

    /// Returns the wire label (e.g. `"add_to_cart"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewProduct => "view_product",
            Self::AddToCart => "add_to_cart",
            Self::SearchQuery => "search_query",
            Self::EmailClick => "email_click",
        }
    }
}

/// Declared priority domain of a record.
///
/// The simulator only emits [`Priority::Medium`] and [`Priority::Critical`];
/// `Low` and `High` are part of the record contract but carry no meaning yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Lowest priority.
    Low,
    /// Default priority of simulated events.
    Medium,
    /// Elevated priority.
    High,
    /// Highest priority; highlighted by the feed renderer.
    Critical,
}

impl Priority {
    /// Returns the wire label (e.g. `"critical"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// One synthesized entry of the live event feed.
///
/// Serialized with camelCase field names:
/// ```json
/// {
///   "id": "0k3x9a2bq",
///   "customerId": "USER-417",
///   "eventType": "add_to_cart",
///   "timestamp": "2026-10-14T09:30:00Z",
///   "priority": "medium"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique while the record is present in the log.
    pub id: EventId,
    /// Simulated customer.
    pub customer_id: CustomerId,
    /// Interaction category.
    pub event_type: EventType,
    /// Creation instant; non-decreasing in emission order.
    pub timestamp: DateTime<Utc>,
    /// Record priority.
    pub priority: Priority,
}
