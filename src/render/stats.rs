//! Stats renderer: segment bar chart and KPI cards.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Catalog;
use crate::domain::catalog::TRIGGERS_EXECUTED_BASELINE;

/// Chart heading.
pub const SEGMENT_CHART_TITLE: &str = "Customer Segmentation Distribution";

/// Number of intervals on the chart's value axis.
const AXIS_INTERVALS: u32 = 4;

/// One bar of the segment chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SegmentBar {
    /// Axis label.
    pub label: String,
    /// Customer count.
    pub count: u32,
    /// Bar color.
    pub color: String,
    /// Height relative to the axis maximum, in `[0, 1]`.
    pub height: f64,
    /// Share of all customers, in percent.
    pub share_pct: f64,
}

/// Rendered segment chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SegmentChart {
    /// Chart heading.
    pub title: String,
    /// Top of the value axis.
    pub axis_max: u32,
    /// Value axis ticks from zero to `axis_max`.
    pub axis_ticks: Vec<u32>,
    /// Bars in catalog order.
    pub bars: Vec<SegmentBar>,
}

/// A headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct KpiCard {
    /// Icon name.
    pub icon: String,
    /// Caption.
    pub label: String,
    /// Display-formatted value.
    pub value: String,
}

/// Rendered stats row: the chart plus its KPI cards.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatsPanel {
    /// Segment chart.
    pub chart: SegmentChart,
    /// KPI cards, top to bottom.
    pub kpis: Vec<KpiCard>,
}

/// Renders the stats row. `live_triggers` is the number of trigger
/// executions since startup and is added to the catalog baseline.
#[must_use]
pub fn render_stats(catalog: &Catalog, live_triggers: u64) -> StatsPanel {
    StatsPanel {
        chart: render_segment_chart(catalog),
        kpis: vec![
            KpiCard {
                icon: "trending_up".to_string(),
                label: "Avg. Affinity Score".to_string(),
                value: format_percent(catalog.avg_affinity_pct),
            },
            KpiCard {
                icon: "target".to_string(),
                label: "Real-Time Triggers Executed".to_string(),
                value: format_count(TRIGGERS_EXECUTED_BASELINE.saturating_add(live_triggers)),
            },
        ],
    }
}

/// Renders the segment bar chart.
#[must_use]
pub fn render_segment_chart(catalog: &Catalog) -> SegmentChart {
    let largest = catalog.segments.iter().map(|s| s.count).max().unwrap_or(0);
    let total: u64 = catalog.segments.iter().map(|s| u64::from(s.count)).sum();
    let axis_max = axis_max(largest);
    let step = axis_max / AXIS_INTERVALS;

    let bars = catalog
        .segments
        .iter()
        .map(|s| SegmentBar {
            label: s.name.to_string(),
            count: s.count,
            color: s.color.to_string(),
            height: ratio(u64::from(s.count), u64::from(axis_max)),
            share_pct: round1(ratio(u64::from(s.count), total) * 100.0),
        })
        .collect();

    SegmentChart {
        title: SEGMENT_CHART_TITLE.to_string(),
        axis_max,
        axis_ticks: (0..=AXIS_INTERVALS).map(|i| i * step).collect(),
        bars,
    }
}

/// Picks an axis top whose tick step has at most two significant digits.
fn axis_max(largest: u32) -> u32 {
    let raw_step = largest.div_ceil(AXIS_INTERVALS).max(1);
    let mut unit = 1_u32;
    while unit.saturating_mul(100) <= raw_step {
        unit = unit.saturating_mul(10);
    }
    raw_step
        .div_ceil(unit)
        .saturating_mul(unit)
        .saturating_mul(AXIS_INTERVALS)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Formats a percentage with one decimal, e.g. `84.2%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Formats an integer with thousands separators, e.g. `12,402`.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12_402), "12,402");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(84.2), "84.2%");
        assert_eq!(format_percent(5.0), "5.0%");
    }

    #[test]
    fn axis_rounds_to_readable_ticks() {
        assert_eq!(axis_max(420), 440);
        assert_eq!(axis_max(85), 88);
        assert_eq!(axis_max(4_000), 4_000);
        assert_eq!(axis_max(0), AXIS_INTERVALS);
    }

    #[test]
    fn chart_matches_catalog() {
        let chart = render_segment_chart(&Catalog::standard());
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Loyalist", "VIP", "New", "Risk"]);
        assert_eq!(chart.axis_ticks.first(), Some(&0));
        assert_eq!(chart.axis_ticks.last(), Some(&chart.axis_max));
        assert!(chart.bars.iter().all(|b| b.height > 0.0 && b.height <= 1.0));

        let share: f64 = chart.bars.iter().map(|b| b.share_pct).sum();
        assert!((share - 100.0).abs() < 0.5);
    }

    #[test]
    fn trigger_card_adds_live_executions() {
        let panel = render_stats(&Catalog::standard(), 0);
        let values: Vec<&str> = panel.kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, vec!["84.2%", "12,402"]);

        let panel = render_stats(&Catalog::standard(), 98);
        assert_eq!(panel.kpis.get(1).map(|k| k.value.as_str()), Some("12,500"));
    }
}
