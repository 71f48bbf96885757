//! Per-connection subscription manager.
//!
//! Tracks which event bus topics a WebSocket client is subscribed to and
//! provides server-side event filtering. Feed updates are not topics;
//! they always reach the view that owns the feed.

use std::collections::HashSet;

use crate::domain::DashboardEventKind;
use crate::error::DashboardError;

/// Topic name that matches every kind.
pub const WILDCARD: &str = "*";

/// Manages the set of topic subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed kinds. If `subscribe_all` is true, this set is ignored.
    kinds: HashSet<DashboardEventKind>,
    /// Whether the client subscribes to all topics (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds topics to the subscription set. `"*"` enables the wildcard.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] if any topic is unknown;
    /// nothing is subscribed in that case.
    pub fn subscribe(&mut self, topics: &[String]) -> Result<(), DashboardError> {
        let (kinds, wildcard) = parse_topics(topics)?;
        self.subscribe_all |= wildcard;
        self.kinds.extend(kinds);
        Ok(())
    }

    /// Removes topics from the subscription set. `"*"` clears everything.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] if any topic is unknown.
    pub fn unsubscribe(&mut self, topics: &[String]) -> Result<(), DashboardError> {
        let (kinds, wildcard) = parse_topics(topics)?;
        if wildcard {
            self.subscribe_all = false;
            self.kinds.clear();
        }
        for kind in kinds {
            self.kinds.remove(&kind);
        }
        Ok(())
    }

    /// Returns `true` if the given kind matches the subscription filter.
    #[must_use]
    pub fn matches(&self, kind: DashboardEventKind) -> bool {
        self.subscribe_all || self.kinds.contains(&kind)
    }

    /// Returns the subscribed topic names in listing order.
    #[must_use]
    pub fn topics(&self) -> Vec<&'static str> {
        if self.subscribe_all {
            return vec![WILDCARD];
        }
        DashboardEventKind::ALL
            .into_iter()
            .filter(|k| self.kinds.contains(k))
            .map(DashboardEventKind::as_str)
            .collect()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

fn parse_topics(topics: &[String]) -> Result<(Vec<DashboardEventKind>, bool), DashboardError> {
    let mut kinds = Vec::with_capacity(topics.len());
    let mut wildcard = false;
    for topic in topics {
        if topic == WILDCARD {
            wildcard = true;
        } else {
            let kind = DashboardEventKind::from_topic(topic).ok_or_else(|| {
                DashboardError::InvalidRequest(format!("unknown topic: {topic}"))
            })?;
            kinds.push(kind);
        }
    }
    Ok((kinds, wildcard))
}
