//! WebSocket connection state machine.
//!
//! Each connection is one open dashboard: it owns a [`DashboardView`]
//! whose feed is mounted on connect, renders every feed update into a
//! frame, dispatches client commands and forwards subscribed bus events.
//! The view is torn down on every exit from the loop; if the task itself
//! is dropped, dropping the view aborts its timer.

use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{ViewEvent, WsCommand, WsMessage};
use super::subscription::SubscriptionManager;
use crate::domain::{DashboardEvent, EventId, FeedUpdate, View};
use crate::error::DashboardError;
use crate::render::render_feed;
use crate::simulator::{DashboardView, FeedSettings};

/// Per-connection state: the view, its last rendered ids and topic filter.
#[derive(Debug)]
pub struct Session {
    view: DashboardView,
    shown: Vec<EventId>,
    subs: SubscriptionManager,
}

impl Session {
    /// Opens a session on the dashboard route and starts its feed.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn open(settings: FeedSettings) -> Self {
        let mut view = DashboardView::new(settings);
        view.mount();
        Self {
            view,
            shown: Vec::new(),
            subs: SubscriptionManager::new(),
        }
    }

    /// Returns the view's current route.
    #[must_use]
    pub const fn route(&self) -> View {
        self.view.route()
    }

    /// Waits for the next feed update; pends while no feed is mounted.
    pub async fn next_update(&mut self) -> Option<FeedUpdate> {
        self.view.next_update().await
    }

    /// Renders a feed update against the previous frame.
    pub fn render_update(&mut self, update: &FeedUpdate) -> WsMessage {
        let frame = render_feed(&self.shown, &update.snapshot, &Utc);
        self.shown = frame.ids();
        WsMessage::event(&ViewEvent::FeedUpdate {
            revision: update.revision(),
            inserted: update.inserted.id,
            evicted: update.evicted.as_ref().map(|r| r.id),
            frame,
        })
    }

    /// Wraps a bus event if the client subscribed to its topic.
    #[must_use]
    pub fn filter_bus_event(&self, event: &DashboardEvent) -> Option<WsMessage> {
        self.subs
            .matches(event.kind())
            .then(|| WsMessage::event(event))
    }

    /// Handles one text frame from the client and returns the replies.
    pub async fn handle_text(&mut self, text: &str) -> Vec<WsMessage> {
        let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
            let err = DashboardError::InvalidRequest("malformed JSON".to_string());
            return vec![WsMessage::error(String::new(), &err)];
        };
        let command = match serde_json::from_value::<WsCommand>(msg.payload) {
            Ok(command) => command,
            Err(e) => {
                let err = DashboardError::InvalidRequest(format!("unknown command: {e}"));
                return vec![WsMessage::error(msg.id, &err)];
            }
        };
        match self.execute(command).await {
            Ok((payload, event)) => {
                let mut replies = vec![WsMessage::response(msg.id, &payload)];
                replies.extend(event.map(|e| WsMessage::event(&e)));
                replies
            }
            Err(err) => vec![WsMessage::error(msg.id, &err)],
        }
    }

    /// Runs a command; returns the response payload and an optional event.
    async fn execute(
        &mut self,
        command: WsCommand,
    ) -> Result<(serde_json::Value, Option<ViewEvent>), DashboardError> {
        match command {
            WsCommand::Navigate { view } => {
                let route: View = view.parse()?;
                let changed = self.view.navigate(route).await;
                if changed {
                    self.shown.clear();
                }
                let mounted = self.view.is_mounted();
                tracing::debug!(%route, changed, mounted, "ws navigate");
                let payload = serde_json::json!({
                    "view": route,
                    "changed": changed,
                    "feed_mounted": mounted,
                });
                let event = changed.then_some(ViewEvent::ViewChanged {
                    view: route,
                    feed_mounted: mounted,
                });
                Ok((payload, event))
            }
            WsCommand::GetFeed => {
                let snapshot = self.view.snapshot().await;
                let frame = render_feed(&self.shown, &snapshot, &Utc);
                Ok((serde_json::to_value(&frame).unwrap_or_default(), None))
            }
            WsCommand::Subscribe { topics } => {
                self.subs.subscribe(&topics)?;
                Ok((serde_json::json!({ "subscribed": self.subs.topics() }), None))
            }
            WsCommand::Unsubscribe { topics } => {
                self.subs.unsubscribe(&topics)?;
                Ok((serde_json::json!({ "subscribed": self.subs.topics() }), None))
            }
        }
    }

    /// Stops the feed and discards its log.
    pub async fn close(mut self) {
        self.view.unmount().await;
    }
}

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Renders and forwards every feed update of the connection's view.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<DashboardEvent>,
    settings: FeedSettings,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut session = Session::open(settings);

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let replies = session.handle_text(&text).await;
                        if !send_all(&mut ws_tx, &replies).await {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "ws receive failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Tick from this connection's feed
            update = session.next_update() => {
                let Some(update) = update else {
                    tracing::warn!("feed stream ended unexpectedly");
                    break;
                };
                let msg = session.render_update(&update);
                if !send_all(&mut ws_tx, std::slice::from_ref(&msg)).await {
                    break;
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        if let Some(msg) = session.filter_bus_event(&event)
                            && !send_all(&mut ws_tx, std::slice::from_ref(&msg)).await
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    session.close().await;
    tracing::debug!("ws connection closed");
}

/// Sends every message; returns `false` once the socket is gone.
async fn send_all<S>(ws_tx: &mut S, messages: &[WsMessage]) -> bool
where
    S: Sink<Message> + Unpin,
{
    for msg in messages {
        let Some(json) = msg.encode() else {
            continue;
        };
        if ws_tx.send(Message::text(json)).await.is_err() {
            return false;
        }
    }
    true
}
