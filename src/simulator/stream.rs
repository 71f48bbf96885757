//! Scoped repeating timer that drives a [`FeedSimulator`].
//!
//! A [`FeedStream`] is the only thing that mutates a simulator once it has
//! been started. Stopping it (explicitly, or by dropping the handle) cancels
//! the timer task, so no tick can land after the owning view is gone.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::FeedSimulator;
use crate::domain::FeedUpdate;

/// Default tick period.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(3_000);

/// Handle to a running feed timer.
///
/// The first tick fires one `period` after [`FeedStream::start`]; each tick
/// runs [`FeedSimulator::tick`] under the simulator lock and then sends the
/// resulting [`FeedUpdate`] to the sink. The send waits for channel space,
/// so the consumer sees every update in tick order.
#[derive(Debug)]
pub struct FeedStream {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl FeedStream {
    /// Spawns the timer task. Must be called inside a tokio runtime.
    ///
    /// A zero `period` is raised to one millisecond.
    #[must_use]
    pub fn start<R>(
        simulator: Arc<Mutex<FeedSimulator<R>>>,
        period: Duration,
        sink: mpsc::Sender<FeedUpdate>,
    ) -> Self
    where
        R: Rng + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let first_tick = Instant::now() + period;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_timer(simulator, first_tick, period, sink, shutdown_rx));
        tracing::debug!(period_ms = period.as_millis(), "feed stream started");
        Self {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Returns `true` while the timer task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancels the timer and waits for the task to exit.
    ///
    /// When this returns the simulator will not be ticked again.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await
                && !e.is_cancelled()
            {
                tracing::error!(error = %e, "feed stream task failed");
            }
        }
        tracing::debug!("feed stream stopped");
    }
}

impl Drop for FeedStream {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("feed stream dropped while running; timer aborted");
        }
    }
}

async fn run_timer<R: Rng>(
    simulator: Arc<Mutex<FeedSimulator<R>>>,
    first_tick: Instant,
    period: Duration,
    sink: mpsc::Sender<FeedUpdate>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let update = simulator.lock().await.tick();
                if sink.send(update).await.is_err() {
                    tracing::debug!("feed consumer gone; stopping timer");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::event_log::DEFAULT_FEED_CAPACITY;
    use crate::simulator::clock::FixedClock;
    use crate::simulator::generator::{DEFAULT_CRITICAL_THRESHOLD, EventGenerator};

    fn shared(seed: u64) -> Arc<Mutex<FeedSimulator>> {
        Arc::new(Mutex::new(FeedSimulator::new(
            EventGenerator::seeded(seed, DEFAULT_CRITICAL_THRESHOLD),
            Arc::new(FixedClock(Utc::now())),
            DEFAULT_FEED_CAPACITY,
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn one_period_one_record() {
        let sim = shared(1);
        let (tx, mut rx) = mpsc::channel(8);
        let stream = FeedStream::start(Arc::clone(&sim), DEFAULT_TICK_INTERVAL, tx);

        tokio::time::advance(DEFAULT_TICK_INTERVAL).await;
        let Some(update) = rx.recv().await else {
            panic!("expected first update");
        };
        assert_eq!(update.revision(), 1);
        assert_eq!(update.snapshot.len(), 1);
        assert_eq!(update.snapshot.newest(), Some(&update.inserted));
        assert_eq!(sim.lock().await.snapshot(), update.snapshot);

        stream.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_before_first_period() {
        let sim = shared(2);
        let (tx, mut rx) = mpsc::channel(8);
        let stream = FeedStream::start(Arc::clone(&sim), DEFAULT_TICK_INTERVAL, tx);

        tokio::time::advance(DEFAULT_TICK_INTERVAL - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert!(sim.lock().await.snapshot().is_empty());

        stream.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn twenty_periods_fill_and_evict() {
        let sim = shared(3);
        let (tx, mut rx) = mpsc::channel(32);
        let stream = FeedStream::start(Arc::clone(&sim), DEFAULT_TICK_INTERVAL, tx);

        let mut first_id = None;
        for tick in 1..=20_u64 {
            tokio::time::advance(DEFAULT_TICK_INTERVAL).await;
            let Some(update) = rx.recv().await else {
                panic!("expected update {tick}");
            };
            assert_eq!(update.revision(), tick);
            assert!(update.snapshot.len() <= DEFAULT_FEED_CAPACITY);
            if tick == 1 {
                first_id = Some(update.inserted.id);
            }
        }
        stream.stop().await;

        let snapshot = sim.lock().await.snapshot();
        assert_eq!(snapshot.len(), DEFAULT_FEED_CAPACITY);
        let Some(first_id) = first_id else {
            panic!("first tick recorded");
        };
        assert!(!snapshot.ids().contains(&first_id));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_the_log() {
        let sim = shared(4);
        let (tx, mut rx) = mpsc::channel(8);
        let stream = FeedStream::start(Arc::clone(&sim), DEFAULT_TICK_INTERVAL, tx);

        tokio::time::advance(DEFAULT_TICK_INTERVAL).await;
        assert!(rx.recv().await.is_some());
        stream.stop().await;

        let frozen = sim.lock().await.snapshot();
        tokio::time::advance(DEFAULT_TICK_INTERVAL * 10).await;
        tokio::task::yield_now().await;

        assert_eq!(sim.lock().await.snapshot(), frozen);
        assert!(rx.recv().await.is_none(), "sender dropped with the task");
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_the_timer() {
        let sim = shared(5);
        let (tx, mut rx) = mpsc::channel(8);
        let stream = FeedStream::start(Arc::clone(&sim), DEFAULT_TICK_INTERVAL, tx);
        assert!(stream.is_running());
        drop(stream);

        tokio::time::advance(DEFAULT_TICK_INTERVAL * 5).await;
        assert!(rx.recv().await.is_none());
        assert!(sim.lock().await.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn closed_sink_ends_the_task() {
        let sim = shared(6);
        let (tx, rx) = mpsc::channel(8);
        let stream = FeedStream::start(Arc::clone(&sim), DEFAULT_TICK_INTERVAL, tx);
        drop(rx);

        tokio::time::advance(DEFAULT_TICK_INTERVAL).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert!(!stream.is_running());
        assert_eq!(sim.lock().await.revision(), 1);
    }
}
