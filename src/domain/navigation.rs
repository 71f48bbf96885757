//! Sidebar navigation routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A route of the dashboard shell.
///
/// Only [`View::Dashboard`] mounts the live feed; every other route
/// unmounts it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Main command center with the live feed.
    #[default]
    Dashboard,
    /// Customer segment management.
    CustomerSegments,
    /// Campaign management.
    Campaigns,
    /// Model and engine settings.
    AiConfiguration,
}

/// Error returned for an unknown route name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl View {
    /// Every route in sidebar order.
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::CustomerSegments,
        Self::Campaigns,
        Self::AiConfiguration,
    ];

    /// Returns the route key (e.g. `"customer_segments"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::CustomerSegments => "customer_segments",
            Self::Campaigns => "campaigns",
            Self::AiConfiguration => "ai_configuration",
        }
    }

    /// Returns the sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::CustomerSegments => "Customer Segments",
            Self::Campaigns => "Campaigns",
            Self::AiConfiguration => "AI Configuration",
        }
    }

    /// Returns `true` if this route shows the live feed.
    #[must_use]
    pub const fn shows_feed(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}
