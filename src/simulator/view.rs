//! Dashboard view controller: navigation state plus the mounted feed.
//!
//! A [`DashboardView`] models one open dashboard. While its route is
//! [`View::Dashboard`] it owns exactly one mounted feed: a fresh
//! [`FeedSimulator`], the [`FeedStream`] ticking it and the receiver for
//! its updates. Navigating elsewhere, calling [`DashboardView::unmount`]
//! or dropping the view tears the feed down and discards its log.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};

use super::clock::{Clock, SystemClock};
use super::generator::{DEFAULT_CRITICAL_THRESHOLD, EventGenerator};
use super::stream::DEFAULT_TICK_INTERVAL;
use super::{FeedSimulator, FeedStream};
use crate::domain::event_log::DEFAULT_FEED_CAPACITY;
use crate::domain::{FeedSnapshot, FeedUpdate, View};

/// Default capacity of the per-view update channel.
pub const DEFAULT_UPDATE_BUFFER: usize = 32;

/// Parameters for every feed a view mounts.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Tick period.
    pub tick_interval: Duration,
    /// Maximum records in the log.
    pub capacity: usize,
    /// Draw threshold above which a record is critical.
    pub critical_threshold: f64,
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Capacity of the update channel between timer and view.
    pub update_buffer: usize,
    /// Timestamp source.
    pub clock: Arc<dyn Clock>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            capacity: DEFAULT_FEED_CAPACITY,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            seed: None,
            update_buffer: DEFAULT_UPDATE_BUFFER,
            clock: Arc::new(SystemClock),
        }
    }
}

impl FeedSettings {
    fn build_simulator(&self) -> FeedSimulator {
        let generator = match self.seed {
            Some(seed) => EventGenerator::seeded(seed, self.critical_threshold),
            None => EventGenerator::from_os_rng(self.critical_threshold),
        };
        FeedSimulator::new(generator, Arc::clone(&self.clock), self.capacity)
    }
}

#[derive(Debug)]
struct MountedFeed {
    simulator: Arc<Mutex<FeedSimulator>>,
    stream: FeedStream,
    updates: mpsc::Receiver<FeedUpdate>,
}

/// One open dashboard and its live feed.
#[derive(Debug)]
pub struct DashboardView {
    settings: FeedSettings,
    route: View,
    feed: Option<MountedFeed>,
}

impl DashboardView {
    /// Creates a view on the [`View::Dashboard`] route without starting the
    /// feed. Call [`DashboardView::mount`] to start it.
    #[must_use]
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            route: View::Dashboard,
            feed: None,
        }
    }

    /// Returns the current route.
    #[must_use]
    pub const fn route(&self) -> View {
        self.route
    }

    /// Returns `true` while a feed is mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.feed.is_some()
    }

    /// Starts the feed if the current route shows it and no feed is mounted.
    ///
    /// Returns `true` if a new feed was started. Calling this on a mounted
    /// view is a no-op, so there is never more than one timer per view.
    /// Must be called inside a tokio runtime.
    pub fn mount(&mut self) -> bool {
        if self.feed.is_some() || !self.route.shows_feed() {
            return false;
        }

        let simulator = Arc::new(Mutex::new(self.settings.build_simulator()));
        let (tx, updates) = mpsc::channel(self.settings.update_buffer.max(1));
        let stream = FeedStream::start(Arc::clone(&simulator), self.settings.tick_interval, tx);
        self.feed = Some(MountedFeed {
            simulator,
            stream,
            updates,
        });
        tracing::info!(route = %self.route, "feed mounted");
        true
    }

    /// Stops the timer and discards the log.
    ///
    /// Returns `true` if a feed was mounted.
    pub async fn unmount(&mut self) -> bool {
        let Some(feed) = self.feed.take() else {
            return false;
        };
        feed.stream.stop().await;
        feed.simulator.lock().await.reset();
        tracing::info!(route = %self.route, "feed unmounted");
        true
    }

    /// Switches route, unmounting or mounting the feed as needed.
    ///
    /// Returns `true` if the route changed.
    pub async fn navigate(&mut self, route: View) -> bool {
        if route == self.route {
            return false;
        }
        if !route.shows_feed() {
            self.unmount().await;
        }
        self.route = route;
        self.mount();
        true
    }

    /// Waits for the next feed update.
    ///
    /// Pends forever while no feed is mounted. Returns `None` if the
    /// mounted feed's timer has ended.
    pub async fn next_update(&mut self) -> Option<FeedUpdate> {
        match self.feed.as_mut() {
            Some(feed) => feed.updates.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Returns the current feed contents, or an empty snapshot when no feed
    /// is mounted.
    pub async fn snapshot(&self) -> FeedSnapshot {
        match &self.feed {
            Some(feed) => feed.simulator.lock().await.snapshot(),
            None => FeedSnapshot::default(),
        }
    }
}
