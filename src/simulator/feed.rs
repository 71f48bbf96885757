//! The synchronous core of a live feed: one generator, one bounded log.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;

use super::clock::{Clock, SystemClock};
use super::generator::{DEFAULT_CRITICAL_THRESHOLD, EventGenerator};
use crate::domain::event_log::DEFAULT_FEED_CAPACITY;
use crate::domain::{EventLog, FeedSnapshot, FeedUpdate};

/// Upper bound on id redraws when a fresh id collides with a live record.
const MAX_ID_DRAWS: usize = 8;

/// Owns the event log of one feed and advances it one tick at a time.
///
/// This type has no timer. [`super::FeedStream`] calls [`FeedSimulator::tick`]
/// on a schedule; tests call it directly.
#[derive(Debug)]
pub struct FeedSimulator<R = StdRng> {
    generator: EventGenerator<R>,
    clock: Arc<dyn Clock>,
    log: EventLog,
    revision: u64,
}

impl FeedSimulator<StdRng> {
    /// Creates a simulator with default capacity and threshold, wall-clock
    /// timestamps and an OS-seeded random source.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            EventGenerator::from_os_rng(DEFAULT_CRITICAL_THRESHOLD),
            Arc::new(SystemClock),
            DEFAULT_FEED_CAPACITY,
        )
    }
}

impl<R: Rng> FeedSimulator<R> {
    /// Creates a simulator with an empty log of the given capacity.
    #[must_use]
    pub fn new(generator: EventGenerator<R>, clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            generator,
            clock,
            log: EventLog::new(capacity),
            revision: 0,
        }
    }

    /// Synthesizes one record, prepends it and evicts the oldest record if
    /// the log is over capacity.
    pub fn tick(&mut self) -> FeedUpdate {
        let mut id = self.generator.next_id();
        for _ in 1..MAX_ID_DRAWS {
            if !self.log.contains(id) {
                break;
            }
            id = self.generator.next_id();
        }

        let record = self.generator.generate_with_id(id, self.clock.now());
        let evicted = self.log.push(record.clone());
        self.revision = self.revision.saturating_add(1);

        tracing::trace!(
            revision = self.revision,
            id = %record.id,
            event_type = record.event_type.as_str(),
            evicted = evicted.is_some(),
            "feed tick"
        );

        FeedUpdate {
            inserted: record,
            evicted,
            snapshot: self.snapshot(),
        }
    }

    /// Returns an immutable copy of the current log.
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            revision: self.revision,
            records: self.log.to_vec(),
        }
    }

    /// Empties the log and restarts the revision count.
    pub fn reset(&mut self) {
        self.log.clear();
        self.revision = 0;
    }

    /// Returns the live log.
    #[must_use]
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Returns the number of ticks since creation or the last reset.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}
