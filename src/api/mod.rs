//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; `/health`, `/ws` and
//! the OpenAPI document live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "AXON AI Dashboard API",
        description = "Personalization command center: dashboard content, trigger execution and a live decision stream over WebSocket."
    ),
    paths(
        handlers::system::health_handler,
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_segments,
        handlers::dashboard::get_campaigns,
        handlers::trigger::execute_trigger,
        handlers::trigger::accept_event,
    ),
    tags(
        (name = "System", description = "Service health"),
        (name = "Dashboard", description = "Rendered dashboard content"),
        (name = "Triggers", description = "Marketing trigger execution"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
        .merge(docs_routes())
}

/// Builds the full application: REST, WebSocket and middleware.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(feature = "swagger-ui")]
fn docs_routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn docs_routes() -> Router<AppState> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/dashboard",
            "/api/v1/segments",
            "/api/v1/campaigns",
            "/api/v1/trigger/execute",
            "/api/v1/trigger/async-event",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
