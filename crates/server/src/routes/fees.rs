use super::announce;
use crate::{
    dtos::fees::FeeResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::fee::{FeeChanges, FeeService, NewFee};
use uuid::Uuid;

/// List student fees, latest due date first
#[utoipa::path(
    get,
    path = "/fees",
    responses(
        (status = 200, description = "Fees with student and fee type", body = [FeeResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Fees"
)]
pub async fn list_fees(State(state): State<AppState>) -> Result<Json<Vec<FeeResponse>>, ApiError> {
    let fees = FeeService::list(&state.db).await?;
    Ok(Json(fees.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/fees/{id}",
    params(("id" = Uuid, Path, description = "Fee ID")),
    responses(
        (status = 200, description = "Fee found", body = FeeResponse),
        (status = 404, description = "Fee not found", body = ErrorResponse)
    ),
    tag = "Fees"
)]
pub async fn get_fee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FeeResponse>, ApiError> {
    let fee = FeeService::get(&state.db, id).await?;
    Ok(Json(fee.into()))
}

/// Record a fee for a student. The status is derived from the amounts when not given.
#[utoipa::path(
    post,
    path = "/fees",
    request_body = NewFee,
    responses(
        (status = 201, description = "Fee recorded", body = FeeResponse),
        (status = 400, description = "Invalid fee", body = ErrorResponse)
    ),
    tag = "Fees"
)]
pub async fn create_fee(
    State(state): State<AppState>,
    Json(input): Json<NewFee>,
) -> Result<(StatusCode, Json<FeeResponse>), ApiError> {
    let result = FeeService::create(&state.db, input).await;
    let fee = announce(&state.notifier, "record fee", result, |record| {
        match &record.student {
            Some(student) => format!("Fee recorded for {}", student.full_name()),
            None => "Fee recorded successfully".to_string(),
        }
    })?;

    Ok((StatusCode::CREATED, Json(fee.into())))
}

#[utoipa::path(
    patch,
    path = "/fees/{id}",
    params(("id" = Uuid, Path, description = "Fee ID")),
    request_body = FeeChanges,
    responses(
        (status = 200, description = "Fee updated", body = FeeResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Fee not found", body = ErrorResponse)
    ),
    tag = "Fees"
)]
pub async fn update_fee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<FeeChanges>,
) -> Result<Json<FeeResponse>, ApiError> {
    let result = FeeService::update(&state.db, id, changes).await;
    let fee = announce(&state.notifier, "update fee", result, |record| {
        format!("Fee updated, status {}", record.fee.status)
    })?;

    Ok(Json(fee.into()))
}

#[utoipa::path(
    delete,
    path = "/fees/{id}",
    params(("id" = Uuid, Path, description = "Fee ID")),
    responses(
        (status = 204, description = "Fee deleted"),
        (status = 404, description = "Fee not found", body = ErrorResponse)
    ),
    tag = "Fees"
)]
pub async fn delete_fee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = FeeService::delete(&state.db, id).await;
    announce(&state.notifier, "delete fee", result, |_| {
        "Fee deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
