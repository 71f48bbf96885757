//! Synthetic record generation over an injected random source.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::customer_id::MAX_CUSTOMER_NUMBER;
use crate::domain::event_id::EVENT_ID_SPACE;
use crate::domain::{CustomerId, EventId, EventRecord, EventType, Priority};

/// Default draw threshold above which a record is `critical` (p ≈ 0.2).
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.8;

/// Builds [`EventRecord`]s from uniform random draws.
///
/// Every field is sampled from `R`, so a seeded [`StdRng`] reproduces the
/// exact same sequence of ids, customers, event types and priorities.
/// Timestamps come from the caller and are clamped so they never run
/// backwards across records produced by one generator.
#[derive(Debug, Clone)]
pub struct EventGenerator<R = StdRng> {
    rng: R,
    critical_threshold: f64,
    last_timestamp: Option<DateTime<Utc>>,
}

impl EventGenerator<StdRng> {
    /// Creates a generator with a deterministic seed.
    #[must_use]
    pub fn seeded(seed: u64, critical_threshold: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), critical_threshold)
    }

    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng(critical_threshold: f64) -> Self {
        Self::new(StdRng::from_os_rng(), critical_threshold)
    }
}

impl<R: Rng> EventGenerator<R> {
    /// Creates a generator over `rng`.
    ///
    /// `critical_threshold` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(rng: R, critical_threshold: f64) -> Self {
        Self {
            rng,
            critical_threshold: critical_threshold.clamp(0.0, 1.0),
            last_timestamp: None,
        }
    }

    /// Draws a fresh random id.
    pub fn next_id(&mut self) -> EventId {
        EventId::from_raw(self.rng.random_range(0..EVENT_ID_SPACE))
    }

    /// Synthesizes one record stamped at `now`.
    pub fn generate(&mut self, now: DateTime<Utc>) -> EventRecord {
        let id = self.next_id();
        self.generate_with_id(id, now)
    }

    /// Synthesizes one record with a caller-chosen id.
    pub fn generate_with_id(&mut self, id: EventId, now: DateTime<Utc>) -> EventRecord {
        let number = self.rng.random_range(0..=MAX_CUSTOMER_NUMBER);
        let customer_id = CustomerId::new(number).unwrap_or(CustomerId::MIN);

        let index = self.rng.random_range(0..EventType::ALL.len());
        let event_type = EventType::ALL
            .get(index)
            .copied()
            .unwrap_or(EventType::ViewProduct);

        let priority = if self.rng.random::<f64>() > self.critical_threshold {
            Priority::Critical
        } else {
            Priority::Medium
        };

        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);

        EventRecord {
            id,
            customer_id,
            event_type,
            timestamp,
            priority,
        }
    }

    /// Returns the critical threshold in use.
    #[must_use]
    pub const fn critical_threshold(&self) -> f64 {
        self.critical_threshold
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let now = Utc::now();
        let mut a = EventGenerator::seeded(7, DEFAULT_CRITICAL_THRESHOLD);
        let mut b = EventGenerator::seeded(7, DEFAULT_CRITICAL_THRESHOLD);
        for _ in 0..50 {
            assert_eq!(a.generate(now), b.generate(now));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let now = Utc::now();
        let mut a = EventGenerator::seeded(1, DEFAULT_CRITICAL_THRESHOLD);
        let mut b = EventGenerator::seeded(2, DEFAULT_CRITICAL_THRESHOLD);
        let xs: Vec<EventId> = (0..10).map(|_| a.generate(now).id).collect();
        let ys: Vec<EventId> = (0..10).map(|_| b.generate(now).id).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn fields_stay_in_domain() {
        let now = Utc::now();
        let mut generator = EventGenerator::seeded(99, DEFAULT_CRITICAL_THRESHOLD);
        for _ in 0..2_000 {
            let record = generator.generate(now);
            assert!(record.customer_id.number() <= MAX_CUSTOMER_NUMBER);
            assert!(record.customer_id.to_string().starts_with("USER-"));
            assert!(EventType::ALL.contains(&record.event_type));
            assert!(matches!(
                record.priority,
                Priority::Medium | Priority::Critical
            ));
            assert_eq!(record.id.to_string().len(), 9);
        }
    }

    #[test]
    fn critical_rate_is_about_one_in_five() {
        let now = Utc::now();
        let mut generator = EventGenerator::seeded(2024, DEFAULT_CRITICAL_THRESHOLD);
        let critical = (0..10_000)
            .filter(|_| generator.generate(now).priority == Priority::Critical)
            .count();
        assert!((1_700..=2_300).contains(&critical), "critical = {critical}");
    }

    #[test]
    fn every_event_type_appears() {
        let now = Utc::now();
        let mut generator = EventGenerator::seeded(5, DEFAULT_CRITICAL_THRESHOLD);
        let seen: Vec<EventType> = (0..400).map(|_| generator.generate(now).event_type).collect();
        for ty in EventType::ALL {
            assert!(seen.contains(&ty), "{} never generated", ty.as_str());
        }
    }

    #[test]
    fn threshold_extremes() {
        let now = Utc::now();
        let mut never = EventGenerator::seeded(3, 1.0);
        let mut always = EventGenerator::seeded(3, -4.0);
        assert_eq!(always.critical_threshold(), 0.0);
        for _ in 0..200 {
            assert_eq!(never.generate(now).priority, Priority::Medium);
        }
        let critical = (0..200)
            .filter(|_| always.generate(now).priority == Priority::Critical)
            .count();
        // A draw of exactly 0.0 is the only way to miss.
        assert!(critical >= 199);
    }

    #[test]
    fn timestamps_never_run_backwards() {
        let start = Utc::now();
        let mut generator = EventGenerator::seeded(11, DEFAULT_CRITICAL_THRESHOLD);
        let first = generator.generate(start);
        let earlier = generator.generate(start - Duration::seconds(30));
        let later = generator.generate(start + Duration::seconds(3));

        assert_eq!(first.timestamp, start);
        assert_eq!(earlier.timestamp, start);
        assert_eq!(later.timestamp, start + Duration::seconds(3));
    }
}
