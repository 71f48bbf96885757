//! Trigger handlers: synchronous execution and background acceptance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{AcceptedResponse, MarketingEventRequest};
use crate::app_state::AppState;
use crate::domain::TriggerExecution;
use crate::error::{DashboardError, ErrorResponse};

/// `POST /trigger/execute`: Evaluate an event and dispatch immediately.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidRequest`] if a required field is empty.
#[utoipa::path(
    post,
    path = "/api/v1/trigger/execute",
    tag = "Triggers",
    summary = "Execute trigger",
    description = "Matches the event to a campaign rule, personalizes the message and dispatches it before responding.",
    request_body = MarketingEventRequest,
    responses(
        (status = 200, description = "Execution record", body = TriggerExecution),
        (status = 400, description = "Invalid event", body = ErrorResponse),
    )
)]
pub async fn execute_trigger(
    State(state): State<AppState>,
    Json(req): Json<MarketingEventRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let execution = state
        .trigger_engine
        .evaluate_and_execute(&req.into_event())?;
    Ok(Json(execution))
}

/// `POST /trigger/async-event`: Queue an event for background evaluation.
#[utoipa::path(
    post,
    path = "/api/v1/trigger/async-event",
    tag = "Triggers",
    summary = "Accept event",
    description = "Returns immediately; the event is evaluated in the background and the result is broadcast to WebSocket subscribers.",
    request_body = MarketingEventRequest,
    responses(
        (status = 202, description = "Event accepted", body = AcceptedResponse),
    )
)]
pub async fn accept_event(
    State(state): State<AppState>,
    Json(req): Json<MarketingEventRequest>,
) -> impl IntoResponse {
    let event_id = state.trigger_engine.accept_async(req.into_event());
    (
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            status: "accepted".to_string(),
            event_id,
        }),
    )
}

/// Trigger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trigger/execute", post(execute_trigger))
        .route("/trigger/async-event", post(accept_event))
}
