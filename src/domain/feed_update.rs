//! Snapshots and per-tick updates produced by a feed simulator.

use serde::Serialize;

use super::{EventId, EventRecord};

/// Immutable copy of a feed log at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    /// Number of ticks since the feed was mounted. Zero before the first tick.
    pub revision: u64,
    /// Records, newest first.
    pub records: Vec<EventRecord>,
}

impl FeedSnapshot {
    /// Returns the record ids, newest first.
    #[must_use]
    pub fn ids(&self) -> Vec<EventId> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Returns the newest record.
    #[must_use]
    pub fn newest(&self) -> Option<&EventRecord> {
        self.records.first()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Result of a single simulator tick.
///
/// Exactly one `FeedUpdate` is produced per tick and delivered in tick
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedUpdate {
    /// Record inserted at index 0.
    pub inserted: EventRecord,
    /// Record dropped from the tail, if the log was full.
    pub evicted: Option<EventRecord>,
    /// Log contents after the tick.
    pub snapshot: FeedSnapshot,
}

impl FeedUpdate {
    /// Returns the snapshot revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.snapshot.revision
    }
}
