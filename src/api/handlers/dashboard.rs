//! Dashboard content handlers: full page, segment stats, campaign table.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::DashboardQuery;
use crate::app_state::AppState;
use crate::domain::{FeedSnapshot, View};
use crate::error::{DashboardError, ErrorResponse};
use crate::render::layout::DashboardPage;
use crate::render::{CampaignTable, StatsPanel, render_campaign_table, render_dashboard, render_stats};

/// `GET /dashboard`: The assembled dashboard page.
///
/// The feed panel is empty here; live records are only streamed over
/// the WebSocket.
///
/// # Errors
///
/// Returns [`DashboardError::UnknownView`] if `view` is not a route key.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Dashboard page",
    description = "Returns the sidebar, header, stats, campaign table and an empty feed panel.",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Rendered page", body = DashboardPage),
        (status = 400, description = "Unknown view", body = ErrorResponse),
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let active = match query.view.as_deref() {
        Some(raw) => raw.parse::<View>()?,
        None => View::Dashboard,
    };
    let page = render_dashboard(
        &state.catalog,
        active,
        state.trigger_engine.triggers_executed(),
        &FeedSnapshot::default(),
        &Utc,
    );
    Ok(Json(page))
}

/// `GET /segments`: Segment chart and KPI cards.
#[utoipa::path(
    get,
    path = "/api/v1/segments",
    tag = "Dashboard",
    summary = "Segment statistics",
    description = "Returns the customer segmentation chart and the KPI cards, including live trigger executions.",
    responses(
        (status = 200, description = "Rendered stats panel", body = StatsPanel),
    )
)]
pub async fn get_segments(State(state): State<AppState>) -> impl IntoResponse {
    Json(render_stats(
        &state.catalog,
        state.trigger_engine.triggers_executed(),
    ))
}

/// `GET /campaigns`: Campaign performance table.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    tag = "Dashboard",
    summary = "Campaign performance",
    description = "Returns the high-affinity campaign table.",
    responses(
        (status = 200, description = "Rendered campaign table", body = CampaignTable),
    )
)]
pub async fn get_campaigns(State(state): State<AppState>) -> impl IntoResponse {
    Json(render_campaign_table(&state.catalog))
}

/// Dashboard content routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/segments", get(get_segments))
        .route("/campaigns", get(get_campaigns))
}
