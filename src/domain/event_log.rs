//! Bounded, newest-first record log.
//!
//! [`EventLog`] holds at most `capacity` records. New records are inserted
//! at the front; once the bound is exceeded the oldest record (the tail) is
//! evicted and handed back to the caller.

use std::collections::VecDeque;

use super::{EventId, EventRecord};

/// Default number of records kept by a feed.
pub const DEFAULT_FEED_CAPACITY: usize = 15;

/// Fixed-capacity record log with drop-oldest eviction.
#[derive(Debug, Clone)]
pub struct EventLog {
    records: VecDeque<EventRecord>,
    capacity: usize,
}

impl EventLog {
    /// Creates an empty log. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Inserts `record` as the newest entry, returning the evicted tail
    /// entry if the log was full.
    pub fn push(&mut self, record: EventRecord) -> Option<EventRecord> {
        self.records.push_front(record);
        if self.records.len() > self.capacity {
            self.records.pop_back()
        } else {
            None
        }
    }

    /// Returns the newest record.
    #[must_use]
    pub fn newest(&self) -> Option<&EventRecord> {
        self.records.front()
    }

    /// Returns the oldest record.
    #[must_use]
    pub fn oldest(&self) -> Option<&EventRecord> {
        self.records.back()
    }

    /// Returns `true` if a record with `id` is currently present.
    #[must_use]
    pub fn contains(&self, id: EventId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Iterates newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// Copies the records newest-first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<EventRecord> {
        self.records.iter().cloned().collect()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the maximum number of records.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}
