//! Renderers: pure functions from snapshots and static content to
//! serializable view models.
//!
//! Nothing here mutates its input or reads the clock; time zones are
//! passed in for timestamp formatting.

pub mod feed;
pub mod layout;
pub mod stats;
pub mod table;

pub use feed::{FeedFrame, FeedItem, Tone, Transition, render_feed};
pub use layout::{DashboardPage, render_dashboard};
pub use stats::{StatsPanel, render_stats};
pub use table::{CampaignTable, render_campaign_table};
