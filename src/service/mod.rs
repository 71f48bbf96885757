//! Service layer: business logic orchestration.
//!
//! [`TriggerEngine`] evaluates marketing events, dispatches actions and
//! emits results through the [`super::domain::EventBus`].

pub mod trigger_engine;

pub use trigger_engine::{ActionDispatcher, LogDispatcher, TriggerEngine};
