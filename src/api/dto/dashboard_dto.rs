//! Dashboard query DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for `GET /dashboard`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// Route to highlight in the sidebar (e.g. `campaigns`). Defaults to
    /// `dashboard`.
    #[serde(default)]
    pub view: Option<String>,
}
