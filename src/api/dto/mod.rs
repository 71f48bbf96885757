//! Data Transfer Objects for REST request/response serialization.
//!
//! Rendered view models are returned as-is; only requests and small
//! acknowledgements get their own types here.

pub mod dashboard_dto;
pub mod trigger_dto;

pub use dashboard_dto::*;
pub use trigger_dto::*;
