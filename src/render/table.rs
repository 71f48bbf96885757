//! Table renderer: campaign performance rows.

use serde::Serialize;
use utoipa::ToSchema;

use super::stats::format_percent;
use crate::domain::Catalog;
use crate::domain::catalog::CampaignPhase;

/// Column headers, left to right.
pub const CAMPAIGN_COLUMNS: [&str; 4] = ["Campaign Name", "Target Segment", "Conv. Rate", "Status"];

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CampaignRow {
    /// Campaign name.
    pub name: String,
    /// Target segment.
    pub segment: String,
    /// Conversion rate, e.g. `"12.4%"`.
    pub conversion_rate: String,
    /// Phase used for the status pill.
    pub phase: CampaignPhase,
    /// Status pill text.
    pub status: String,
}

/// Rendered campaign table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CampaignTable {
    /// Table heading.
    pub title: String,
    /// Column headers.
    pub columns: Vec<String>,
    /// Rows in catalog order.
    pub rows: Vec<CampaignRow>,
}

/// Renders the campaign performance table.
#[must_use]
pub fn render_campaign_table(catalog: &Catalog) -> CampaignTable {
    CampaignTable {
        title: catalog.campaign_table_title.to_string(),
        columns: CAMPAIGN_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows: catalog
            .campaigns
            .iter()
            .map(|c| CampaignRow {
                name: c.name.to_string(),
                segment: c.segment.to_string(),
                conversion_rate: format_percent(c.conversion_rate_pct),
                phase: c.phase,
                status: c.phase.label().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_catalog() {
        let table = render_campaign_table(&Catalog::standard());
        assert_eq!(table.title, "High-Affinity Campaign Performance");
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows.len(), 3);

        let Some(churn) = table.rows.get(1) else {
            panic!("three rows expected");
        };
        assert_eq!(churn.name, "Churn Prevention Alpha");
        assert_eq!(churn.segment, "Risk");
        assert_eq!(churn.conversion_rate, "5.2%");
        assert_eq!(churn.status, "Optimization");
    }

    #[test]
    fn rates_are_formatted() {
        let table = render_campaign_table(&Catalog::standard());
        let rates: Vec<&str> = table.rows.iter().map(|r| r.conversion_rate.as_str()).collect();
        assert_eq!(rates, vec!["12.4%", "5.2%", "8.1%"]);
    }
}
