use crate::{
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::dashboard::{DashboardService, DashboardStats};

/// Headline numbers for the dashboard
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Totals across the school", body = DashboardStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(DashboardService::stats(&state.db).await?))
}
