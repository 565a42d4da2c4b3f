use super::announce;
use crate::{
    dtos::academics::TermResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::term::{NewTerm, TermChanges, TermService};
use uuid::Uuid;

/// List terms, latest start first
#[utoipa::path(
    get,
    path = "/terms",
    responses(
        (status = 200, description = "All terms", body = [TermResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Terms"
)]
pub async fn list_terms(State(state): State<AppState>) -> Result<Json<Vec<TermResponse>>, ApiError> {
    let terms = TermService::list(&state.db).await?;
    Ok(Json(terms.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/terms/{id}",
    params(("id" = Uuid, Path, description = "Term ID")),
    responses(
        (status = 200, description = "Term found", body = TermResponse),
        (status = 404, description = "Term not found", body = ErrorResponse)
    ),
    tag = "Terms"
)]
pub async fn get_term(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TermResponse>, ApiError> {
    let term = TermService::get(&state.db, id).await?;
    Ok(Json(term.into()))
}

#[utoipa::path(
    post,
    path = "/terms",
    request_body = NewTerm,
    responses(
        (status = 201, description = "Term created", body = TermResponse),
        (status = 400, description = "Invalid term", body = ErrorResponse)
    ),
    tag = "Terms"
)]
pub async fn create_term(
    State(state): State<AppState>,
    Json(input): Json<NewTerm>,
) -> Result<(StatusCode, Json<TermResponse>), ApiError> {
    let result = TermService::create(&state.db, input).await;
    let term = announce(&state.notifier, "create term", result, |term| {
        format!("Term {} created successfully", term.name)
    })?;

    Ok((StatusCode::CREATED, Json(term.into())))
}

#[utoipa::path(
    patch,
    path = "/terms/{id}",
    params(("id" = Uuid, Path, description = "Term ID")),
    request_body = TermChanges,
    responses(
        (status = 200, description = "Term updated", body = TermResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Term not found", body = ErrorResponse)
    ),
    tag = "Terms"
)]
pub async fn update_term(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<TermChanges>,
) -> Result<Json<TermResponse>, ApiError> {
    let result = TermService::update(&state.db, id, changes).await;
    let term = announce(&state.notifier, "update term", result, |term| {
        format!("Term {} updated successfully", term.name)
    })?;

    Ok(Json(term.into()))
}

#[utoipa::path(
    delete,
    path = "/terms/{id}",
    params(("id" = Uuid, Path, description = "Term ID")),
    responses(
        (status = 204, description = "Term deleted"),
        (status = 404, description = "Term not found", body = ErrorResponse)
    ),
    tag = "Terms"
)]
pub async fn delete_term(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = TermService::delete(&state.db, id).await;
    announce(&state.notifier, "delete term", result, |_| {
        "Term deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
