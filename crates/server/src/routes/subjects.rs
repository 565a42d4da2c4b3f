use super::announce;
use crate::{
    dtos::academics::SubjectResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::subject::{NewSubject, SubjectChanges, SubjectService};
use uuid::Uuid;

/// List subjects alphabetically
#[utoipa::path(
    get,
    path = "/subjects",
    responses(
        (status = 200, description = "All subjects", body = [SubjectResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    let subjects = SubjectService::list(&state.db).await?;
    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject found", body = SubjectResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = SubjectService::get(&state.db, id).await?;
    Ok(Json(subject.into()))
}

#[utoipa::path(
    post,
    path = "/subjects",
    request_body = NewSubject,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 400, description = "Invalid or duplicate subject", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn create_subject(
    State(state): State<AppState>,
    Json(input): Json<NewSubject>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    let result = SubjectService::create(&state.db, input).await;
    let subject = announce(&state.notifier, "create subject", result, |subject| {
        format!("Subject {} created successfully", subject.name)
    })?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

#[utoipa::path(
    patch,
    path = "/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    request_body = SubjectChanges,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<SubjectChanges>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let result = SubjectService::update(&state.db, id, changes).await;
    let subject = announce(&state.notifier, "update subject", result, |subject| {
        format!("Subject {} updated successfully", subject.name)
    })?;

    Ok(Json(subject.into()))
}

/// Delete a subject along with its teacher and class links and its exams
#[utoipa::path(
    delete,
    path = "/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = SubjectService::delete(&state.db, id).await;
    announce(&state.notifier, "delete subject", result, |_| {
        "Subject deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
