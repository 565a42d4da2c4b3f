//! Lookup data used to fill in forms: academic years and fee types.

use super::announce;
use crate::{
    dtos::{academics::AcademicYearResponse, fees::FeeTypeResponse},
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::{
    academic_year::{AcademicYearService, NewAcademicYear},
    fee_type::{FeeTypeService, NewFeeType},
};

#[utoipa::path(
    get,
    path = "/academic-years",
    responses(
        (status = 200, description = "Academic years, latest first", body = [AcademicYearResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reference"
)]
pub async fn list_academic_years(
    State(state): State<AppState>,
) -> Result<Json<Vec<AcademicYearResponse>>, ApiError> {
    let years = AcademicYearService::list(&state.db).await?;
    Ok(Json(years.into_iter().map(Into::into).collect()))
}

/// The academic year marked as current, or `null` when none is
#[utoipa::path(
    get,
    path = "/academic-years/current",
    responses(
        (status = 200, description = "Current academic year, or null", body = AcademicYearResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reference"
)]
pub async fn current_academic_year(
    State(state): State<AppState>,
) -> Result<Json<Option<AcademicYearResponse>>, ApiError> {
    let year = AcademicYearService::current(&state.db).await?;
    Ok(Json(year.map(Into::into)))
}

#[utoipa::path(
    post,
    path = "/academic-years",
    request_body = NewAcademicYear,
    responses(
        (status = 201, description = "Academic year created", body = AcademicYearResponse),
        (status = 400, description = "Invalid academic year", body = ErrorResponse)
    ),
    tag = "Reference"
)]
pub async fn create_academic_year(
    State(state): State<AppState>,
    Json(input): Json<NewAcademicYear>,
) -> Result<(StatusCode, Json<AcademicYearResponse>), ApiError> {
    let result = AcademicYearService::create(&state.db, input).await;
    let year = announce(&state.notifier, "create academic year", result, |year| {
        format!("Academic year {} created successfully", year.name)
    })?;

    Ok((StatusCode::CREATED, Json(year.into())))
}

/// Active fee types by name
#[utoipa::path(
    get,
    path = "/fee-types",
    responses(
        (status = 200, description = "Active fee types", body = [FeeTypeResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reference"
)]
pub async fn list_fee_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeeTypeResponse>>, ApiError> {
    let fee_types = FeeTypeService::list_active(&state.db).await?;
    Ok(Json(fee_types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/fee-types",
    request_body = NewFeeType,
    responses(
        (status = 201, description = "Fee type created", body = FeeTypeResponse),
        (status = 400, description = "Invalid fee type", body = ErrorResponse)
    ),
    tag = "Reference"
)]
pub async fn create_fee_type(
    State(state): State<AppState>,
    Json(input): Json<NewFeeType>,
) -> Result<(StatusCode, Json<FeeTypeResponse>), ApiError> {
    let result = FeeTypeService::create(&state.db, input).await;
    let fee_type = announce(&state.notifier, "create fee type", result, |fee_type| {
        format!("Fee type {} created successfully", fee_type.name)
    })?;

    Ok((StatusCode::CREATED, Json(fee_type.into())))
}
