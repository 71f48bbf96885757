//! Static dashboard content: segments, KPIs and campaign rows.
//!
//! None of this is computed. It is the fixed copy and figures the
//! renderers lay out around the live feed.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of trigger executions shown before any live execution.
pub const TRIGGERS_EXECUTED_BASELINE: u64 = 12_402;

/// A customer segment and its population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Segment name shown on the chart axis.
    pub name: &'static str,
    /// Number of customers.
    pub count: u32,
    /// Bar color as a hex string.
    pub color: &'static str,
}

/// Rollout phase of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampaignPhase {
    /// Running normally.
    Active,
    /// Running with the optimizer adjusting targeting.
    Optimization,
}

impl CampaignPhase {
    /// Returns the status pill label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Optimization => "Optimization",
        }
    }
}

/// A campaign row of the performance table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Campaign {
    /// Campaign name.
    pub name: &'static str,
    /// Targeted segment label.
    pub segment: &'static str,
    /// Conversion rate in percent.
    pub conversion_rate_pct: f64,
    /// Current phase.
    pub phase: CampaignPhase,
}

/// Everything the dashboard shows that does not come from the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Product name in the sidebar.
    pub brand: &'static str,
    /// Page title.
    pub title: &'static str,
    /// Page subtitle.
    pub subtitle: &'static str,
    /// Header buttons, left to right.
    pub actions: [&'static str; 2],
    /// Inference latency on the system health card, in milliseconds.
    pub inference_latency_ms: u32,
    /// Segment chart bars.
    pub segments: Vec<Segment>,
    /// Average affinity score in percent.
    pub avg_affinity_pct: f64,
    /// Title of the campaign table.
    pub campaign_table_title: &'static str,
    /// Campaign table rows.
    pub campaigns: Vec<Campaign>,
}

impl Catalog {
    /// Returns the content of the AXON AI command center.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            brand: "AXON AI",
            title: "Personalization Command Center",
            subtitle: "มุ่งสู่ความเป็นผู้นำด้านการตลาดเฉพาะบุคคลด้วยเทคโนโลยี AI",
            actions: ["Export Analytics", "New Campaign"],
            inference_latency_ms: 14,
            segments: vec![
                Segment {
                    name: "Loyalist",
                    count: 420,
                    color: "#10b981",
                },
                Segment {
                    name: "VIP",
                    count: 150,
                    color: "#f59e0b",
                },
                Segment {
                    name: "New",
                    count: 320,
                    color: "#3b82f6",
                },
                Segment {
                    name: "Risk",
                    count: 85,
                    color: "#ef4444",
                },
            ],
            avg_affinity_pct: 84.2,
            campaign_table_title: "High-Affinity Campaign Performance",
            campaigns: vec![
                Campaign {
                    name: "VIP Summer Rewards",
                    segment: "VIPs",
                    conversion_rate_pct: 12.4,
                    phase: CampaignPhase::Active,
                },
                Campaign {
                    name: "Churn Prevention Alpha",
                    segment: "Risk",
                    conversion_rate_pct: 5.2,
                    phase: CampaignPhase::Optimization,
                },
                Campaign {
                    name: "Cross-Sell: Tech Essentials",
                    segment: "Loyalists",
                    conversion_rate_pct: 8.1,
                    phase: CampaignPhase::Active,
                },
            ],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
