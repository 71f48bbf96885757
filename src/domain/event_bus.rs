//! Broadcast channel for process-wide dashboard events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. The trigger
//! engine publishes a [`DashboardEvent`] for every accepted or executed
//! trigger, and each WebSocket view subscribes on connect.

use tokio::sync::broadcast;

use super::DashboardEvent;

/// Default capacity of the broadcast ring buffer.
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Broadcast bus for [`DashboardEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event. With no
    /// receivers the event is dropped.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver for all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUS_CAPACITY)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn accepted(event_id: &str) -> DashboardEvent {
        DashboardEvent::TriggerAccepted {
            event_id: event_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(accepted("a")), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_same_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(accepted("evt-7")), 2);

        for rx in [&mut rx1, &mut rx2] {
            let Ok(DashboardEvent::TriggerAccepted { event_id, .. }) = rx.recv().await else {
                panic!("expected trigger_accepted");
            };
            assert_eq!(event_id, "evt-7");
        }
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.receiver_count(), 0);

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(rx1);
        assert_eq!(bus.receiver_count(), 1);
    }
}
