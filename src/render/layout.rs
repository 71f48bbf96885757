//! Layout renderer: the full dashboard page.

use chrono::TimeZone;
use serde::Serialize;
use utoipa::ToSchema;

use super::feed::{FeedFrame, render_feed};
use super::stats::{StatsPanel, render_stats};
use super::table::{CampaignTable, render_campaign_table};
use crate::domain::{Catalog, FeedSnapshot, View};

/// One sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavLink {
    /// Route key.
    pub view: View,
    /// Link text.
    pub label: String,
    /// Whether this is the current route.
    pub active: bool,
}

/// Sidebar health card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthCard {
    /// Card heading.
    pub title: String,
    /// Metric caption.
    pub label: String,
    /// Metric value, e.g. `"14ms"`.
    pub value: String,
}

/// Fixed sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Sidebar {
    /// Product name.
    pub brand: String,
    /// Navigation links.
    pub navigation: Vec<NavLink>,
    /// System health card.
    pub health: HealthCard,
}

/// Page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Header {
    /// Page title.
    pub title: String,
    /// Page subtitle.
    pub subtitle: String,
    /// Action buttons, left to right.
    pub actions: Vec<String>,
}

/// The assembled dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardPage {
    /// Sidebar.
    pub sidebar: Sidebar,
    /// Header.
    pub header: Header,
    /// Segment chart and KPIs.
    pub stats: StatsPanel,
    /// Campaign table.
    pub campaigns: CampaignTable,
    /// Live feed panel.
    pub feed: FeedFrame,
}

/// Renders the sidebar with `active` highlighted.
#[must_use]
pub fn render_sidebar(catalog: &Catalog, active: View) -> Sidebar {
    Sidebar {
        brand: catalog.brand.to_string(),
        navigation: View::ALL
            .into_iter()
            .map(|view| NavLink {
                view,
                label: view.label().to_string(),
                active: view == active,
            })
            .collect(),
        health: HealthCard {
            title: "AI System Health".to_string(),
            label: "Inference Latency".to_string(),
            value: format!("{}ms", catalog.inference_latency_ms),
        },
    }
}

/// Renders the whole dashboard page around a feed snapshot.
#[must_use]
pub fn render_dashboard<Tz: TimeZone>(
    catalog: &Catalog,
    active: View,
    live_triggers: u64,
    feed: &FeedSnapshot,
    tz: &Tz,
) -> DashboardPage
where
    Tz::Offset: std::fmt::Display,
{
    DashboardPage {
        sidebar: render_sidebar(catalog, active),
        header: Header {
            title: catalog.title.to_string(),
            subtitle: catalog.subtitle.to_string(),
            actions: catalog.actions.iter().map(|a| (*a).to_string()).collect(),
        },
        stats: render_stats(catalog, live_triggers),
        campaigns: render_campaign_table(catalog),
        feed: render_feed(&[], feed, tz),
    }
}
