//! Feed renderer: turns a log snapshot into a frame of display items.
//!
//! Items are keyed by [`EventId`]. Comparing the ids of the previous frame
//! with the new snapshot tells the client which items enter, which stay in
//! place and which exit.

use std::collections::HashSet;

use chrono::TimeZone;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventId, EventRecord, EventType, FeedSnapshot, Priority};

/// Feed panel title.
pub const FEED_TITLE: &str = "Real-Time Decision Stream";

/// Feed panel badge.
pub const FEED_BADGE: &str = "Live";

/// Visual emphasis of an item's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Highlighted (critical priority).
    Alert,
    /// Neutral.
    Info,
}

impl From<Priority> for Tone {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Critical => Self::Alert,
            Priority::Low | Priority::Medium | Priority::High => Self::Info,
        }
    }
}

/// How an item should animate in this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Newly inserted since the previous frame.
    Enter,
    /// Already shown in the previous frame.
    Present,
}

/// One rendered feed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeedItem {
    /// Stable key of the row.
    #[schema(value_type = String)]
    pub id: EventId,
    /// Event type label.
    pub event_type: EventType,
    /// Customer line, e.g. `"CID: USER-417"`.
    pub customer_label: String,
    /// Local time of the event, `HH:MM:SS`.
    pub time_label: String,
    /// Record priority.
    pub priority: Priority,
    /// Icon emphasis.
    pub tone: Tone,
    /// Animation for this frame.
    pub transition: Transition,
}

/// A rendered feed panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeedFrame {
    /// Panel title.
    pub title: String,
    /// Panel badge.
    pub badge: String,
    /// Snapshot revision this frame was rendered from.
    pub revision: u64,
    /// Rows, newest first.
    pub items: Vec<FeedItem>,
    /// Ids shown in the previous frame that are gone now.
    #[schema(value_type = Vec<String>)]
    pub exiting: Vec<EventId>,
}

impl FeedFrame {
    /// Returns the row ids, newest first.
    #[must_use]
    pub fn ids(&self) -> Vec<EventId> {
        self.items.iter().map(|i| i.id).collect()
    }
}

/// Renders `snapshot` relative to the ids of the previously rendered frame.
///
/// Pass an empty slice for the first frame; with nothing shown before,
/// every item enters.
#[must_use]
pub fn render_feed<Tz: TimeZone>(
    previous: &[EventId],
    snapshot: &FeedSnapshot,
    tz: &Tz,
) -> FeedFrame
where
    Tz::Offset: std::fmt::Display,
{
    let before: HashSet<EventId> = previous.iter().copied().collect();
    let now: HashSet<EventId> = snapshot.records.iter().map(|r| r.id).collect();

    let items = snapshot
        .records
        .iter()
        .map(|record| render_item(record, before.contains(&record.id), tz))
        .collect();

    let exiting = previous
        .iter()
        .copied()
        .filter(|id| !now.contains(id))
        .collect();

    FeedFrame {
        title: FEED_TITLE.to_string(),
        badge: FEED_BADGE.to_string(),
        revision: snapshot.revision,
        items,
        exiting,
    }
}

fn render_item<Tz: TimeZone>(record: &EventRecord, was_shown: bool, tz: &Tz) -> FeedItem
where
    Tz::Offset: std::fmt::Display,
{
    FeedItem {
        id: record.id,
        event_type: record.event_type,
        customer_label: format!("CID: {}", record.customer_id),
        time_label: record
            .timestamp
            .with_timezone(tz)
            .format("%H:%M:%S")
            .to_string(),
        priority: record.priority,
        tone: Tone::from(record.priority),
        transition: if was_shown {
            Transition::Present
        } else {
            Transition::Enter
        },
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{DateTime, FixedOffset, Utc};

    use super::*;
    use crate::domain::CustomerId;

    fn at(raw: u64, rfc3339: &str, priority: Priority) -> EventRecord {
        let Ok(ts) = DateTime::parse_from_rfc3339(rfc3339) else {
            panic!("bad test timestamp");
        };
        EventRecord {
            id: EventId::from_raw(raw),
            customer_id: CustomerId::new(417).unwrap_or(CustomerId::MIN),
            event_type: EventType::EmailClick,
            timestamp: ts.with_timezone(&Utc),
            priority,
        }
    }

    fn snapshot(revision: u64, records: Vec<EventRecord>) -> FeedSnapshot {
        FeedSnapshot { revision, records }
    }

    #[test]
    fn first_frame_everything_enters() {
        let snap = snapshot(
            2,
            vec![
                at(2, "2026-10-14T09:30:03Z", Priority::Critical),
                at(1, "2026-10-14T09:30:00Z", Priority::Medium),
            ],
        );
        let frame = render_feed(&[], &snap, &Utc);

        assert_eq!(frame.title, FEED_TITLE);
        assert_eq!(frame.badge, "Live");
        assert_eq!(frame.revision, 2);
        assert!(frame.items.iter().all(|i| i.transition == Transition::Enter));
        assert!(frame.exiting.is_empty());
    }

    #[test]
    fn insertion_and_eviction_are_distinguishable() {
        let previous = [EventId::from_raw(2), EventId::from_raw(1)];
        let snap = snapshot(
            3,
            vec![
                at(3, "2026-10-14T09:30:06Z", Priority::Medium),
                at(2, "2026-10-14T09:30:03Z", Priority::Medium),
            ],
        );
        let frame = render_feed(&previous, &snap, &Utc);

        let transitions: Vec<Transition> = frame.items.iter().map(|i| i.transition).collect();
        assert_eq!(transitions, vec![Transition::Enter, Transition::Present]);
        assert_eq!(frame.exiting, vec![EventId::from_raw(1)]);
        assert_eq!(frame.ids(), snap.ids());
    }

    #[test]
    fn labels_and_tone() {
        let snap = snapshot(1, vec![at(9, "2026-10-14T09:30:07Z", Priority::Critical)]);
        let frame = render_feed(&[], &snap, &Utc);
        let Some(item) = frame.items.first() else {
            panic!("one item expected");
        };
        assert_eq!(item.customer_label, "CID: USER-417");
        assert_eq!(item.time_label, "09:30:07");
        assert_eq!(item.tone, Tone::Alert);
        assert_eq!(item.event_type, EventType::EmailClick);
    }

    #[test]
    fn time_label_uses_given_zone() {
        let Some(bangkok) = FixedOffset::east_opt(7 * 3600) else {
            panic!("valid offset");
        };
        let snap = snapshot(1, vec![at(9, "2026-10-14T20:15:00Z", Priority::Medium)]);
        let frame = render_feed(&[], &snap, &bangkok);
        assert_eq!(
            frame.items.first().map(|i| i.time_label.as_str()),
            Some("03:15:00")
        );
    }

    #[test]
    fn only_critical_is_alert() {
        assert_eq!(Tone::from(Priority::Critical), Tone::Alert);
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Tone::from(p), Tone::Info);
        }
    }

    #[test]
    fn rendering_does_not_touch_input() {
        let snap = snapshot(1, vec![at(4, "2026-10-14T09:30:00Z", Priority::Medium)]);
        let copy = snap.clone();
        let _ = render_feed(&[EventId::from_raw(8)], &snap, &Utc);
        assert_eq!(snap, copy);
    }
}
