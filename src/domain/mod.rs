//! Domain layer: feed records, the bounded log, static dashboard content
//! and the event bus.
//!
//! Everything here is synchronous and free of I/O. The simulator builds
//! records and logs out of these types, and the renderers read them.

pub mod catalog;
pub mod customer_id;
pub mod dashboard_event;
pub mod event_bus;
pub mod event_id;
pub mod event_log;
pub mod event_record;
pub mod feed_update;
pub mod navigation;
pub mod trigger;

pub use catalog::Catalog;
pub use customer_id::CustomerId;
pub use dashboard_event::{DashboardEvent, DashboardEventKind};
pub use event_bus::EventBus;
pub use event_id::EventId;
pub use event_log::EventLog;
pub use event_record::{EventRecord, EventType, Priority};
pub use feed_update::{FeedSnapshot, FeedUpdate};
pub use navigation::View;
pub use trigger::{Channel, ExecutionStatus, MarketingEvent, TriggerExecution};
