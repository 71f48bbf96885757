//! Trigger engine: matches marketing events to campaign rules and
//! dispatches personalized actions.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::{Channel, DashboardEvent, EventBus, ExecutionStatus, MarketingEvent, TriggerExecution};
use crate::error::DashboardError;

/// Placeholder replaced by the customer's display name.
const NAME_PLACEHOLDER: &str = "{name}";

/// Number of customer id characters used in the display name.
const NAME_PREFIX_CHARS: usize = 4;

/// A campaign rule: what to send, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignRule {
    /// Rule name reported as `action_taken`.
    pub name: &'static str,
    /// Delivery channel.
    pub channel: Channel,
    /// Message template; may contain `{name}`.
    pub template: &'static str,
}

const CART_RECOVERY: CampaignRule = CampaignRule {
    name: "Recovery-v1",
    channel: Channel::Push,
    template: "Hey {name}, your items are waiting!",
};

const GEOFENCE_OFFER: CampaignRule = CampaignRule {
    name: "Geofence-Offer",
    channel: Channel::Sms,
    template: "Welcome! Use code NEARBY for 10% off.",
};

const GENERIC_ENGAGEMENT: CampaignRule = CampaignRule {
    name: "Generic-Engagement",
    channel: Channel::Email,
    template: "Hello! Check out our new arrivals.",
};

/// Returns the rule for an event type, falling back to generic engagement.
#[must_use]
pub fn match_rule(event_type: &str) -> CampaignRule {
    match event_type {
        "cart_abandoned" => CART_RECOVERY,
        "location_entry" => GEOFENCE_OFFER,
        _ => GENERIC_ENGAGEMENT,
    }
}

/// Fills the `{name}` placeholder with `User_` and the first four
/// characters of the customer id.
#[must_use]
pub fn personalize(template: &str, customer_id: &str) -> String {
    let prefix: String = customer_id.chars().take(NAME_PREFIX_CHARS).collect();
    template.replace(NAME_PLACEHOLDER, &format!("User_{prefix}"))
}

/// Delivers a personalized message to a customer.
pub trait ActionDispatcher: Send + Sync + fmt::Debug {
    /// Sends `content` to `customer_id` over `channel`. Returns `true` if
    /// the provider accepted it.
    fn dispatch(&self, customer_id: &str, channel: Channel, content: &str) -> bool;
}

/// Dispatcher that only logs the action.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

impl ActionDispatcher for LogDispatcher {
    fn dispatch(&self, customer_id: &str, channel: Channel, content: &str) -> bool {
        tracing::info!(customer_id, %channel, content, "dispatching action");
        true
    }
}

/// Evaluates marketing events and publishes the outcome on the
/// [`EventBus`].
#[derive(Debug)]
pub struct TriggerEngine {
    dispatcher: Arc<dyn ActionDispatcher>,
    event_bus: EventBus,
    executed: AtomicU64,
}

impl TriggerEngine {
    /// Creates an engine that dispatches through [`LogDispatcher`].
    #[must_use]
    pub fn new(event_bus: EventBus) -> Self {
        Self::with_dispatcher(event_bus, Arc::new(LogDispatcher))
    }

    /// Creates an engine with a custom dispatcher.
    #[must_use]
    pub fn with_dispatcher(event_bus: EventBus, dispatcher: Arc<dyn ActionDispatcher>) -> Self {
        Self {
            dispatcher,
            event_bus,
            executed: AtomicU64::new(0),
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Number of successful executions since startup.
    #[must_use]
    pub fn triggers_executed(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }

    /// Evaluates `event` against the campaign rules and dispatches the
    /// matched action.
    ///
    /// A rejected dispatch is not an error; it yields a
    /// [`ExecutionStatus::Failed`] record.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] if `customer_id`,
    /// `event_type` or `platform` is empty.
    pub fn evaluate_and_execute(
        &self,
        event: &MarketingEvent,
    ) -> Result<TriggerExecution, DashboardError> {
        validate(event)?;

        let rule = match_rule(&event.event_type);
        let content = personalize(rule.template, &event.customer_id);
        let delivered = self
            .dispatcher
            .dispatch(&event.customer_id, rule.channel, &content);

        let status = if delivered {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failed
        };
        let triggers_executed = if delivered {
            self.executed.fetch_add(1, Ordering::Relaxed).saturating_add(1)
        } else {
            self.triggers_executed()
        };

        let execution = TriggerExecution {
            execution_id: uuid::Uuid::new_v4(),
            event_id: event.event_id.clone(),
            customer_id: event.customer_id.clone(),
            status,
            action_taken: rule.name.to_string(),
            target_channel: rule.channel,
            personalized_content: Some(content),
            timestamp: Utc::now(),
        };

        tracing::info!(
            event_id = %event.event_id,
            action = rule.name,
            channel = %rule.channel,
            ?status,
            "trigger executed"
        );

        let _ = self.event_bus.publish(DashboardEvent::TriggerExecuted {
            execution: execution.clone(),
            triggers_executed,
        });

        Ok(execution)
    }

    /// Queues `event` for background evaluation and returns its id.
    ///
    /// Validation failures in the background task are logged, not
    /// returned. Must be called inside a tokio runtime.
    pub fn accept_async(self: &Arc<Self>, event: MarketingEvent) -> String {
        let event_id = event.event_id.clone();
        let _ = self.event_bus.publish(DashboardEvent::TriggerAccepted {
            event_id: event_id.clone(),
            timestamp: Utc::now(),
        });

        let engine = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = engine.evaluate_and_execute(&event) {
                tracing::warn!(event_id = %event.event_id, error = %e, "background trigger rejected");
            }
        });

        tracing::debug!(%event_id, "trigger accepted");
        event_id
    }
}

fn validate(event: &MarketingEvent) -> Result<(), DashboardError> {
    for (field, value) in [
        ("customer_id", &event.customer_id),
        ("event_type", &event.event_type),
        ("platform", &event.platform),
    ] {
        if value.trim().is_empty() {
            return Err(DashboardError::InvalidRequest(format!(
                "{field} must not be empty"
            )));
        }
    }
    Ok(())
}
