use super::announce;
use crate::{
    dtos::people::TeacherResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::teacher::{NewTeacher, TeacherChanges, TeacherService};
use uuid::Uuid;

/// List teachers with the subjects they teach, newest first
#[utoipa::path(
    get,
    path = "/teachers",
    responses(
        (status = 200, description = "Teachers with their subjects", body = [TeacherResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherResponse>>, ApiError> {
    let teachers = TeacherService::list(&state.db).await?;
    Ok(Json(teachers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeacherResponse>, ApiError> {
    let teacher = TeacherService::get(&state.db, id).await?;
    Ok(Json(teacher.into()))
}

/// Create a teacher and link the named subjects.
///
/// Every subject name must match an existing subject, otherwise nothing is written.
#[utoipa::path(
    post,
    path = "/teachers",
    request_body = NewTeacher,
    responses(
        (status = 201, description = "Teacher created", body = TeacherResponse),
        (status = 400, description = "Invalid teacher", body = ErrorResponse),
        (status = 422, description = "Unknown subject names", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(input): Json<NewTeacher>,
) -> Result<(StatusCode, Json<TeacherResponse>), ApiError> {
    let result = TeacherService::create(&state.db, input).await;
    let teacher = announce(&state.notifier, "create teacher", result, |record| {
        format!("Teacher {} created successfully", record.teacher.full_name())
    })?;

    Ok((StatusCode::CREATED, Json(teacher.into())))
}

/// Update a teacher. A `subjects` list replaces the linked subjects; omit it to keep them.
#[utoipa::path(
    patch,
    path = "/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = TeacherChanges,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 422, description = "Unknown subject names", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<TeacherChanges>,
) -> Result<Json<TeacherResponse>, ApiError> {
    let result = TeacherService::update(&state.db, id, changes).await;
    let teacher = announce(&state.notifier, "update teacher", result, |record| {
        format!("Teacher {} updated successfully", record.teacher.full_name())
    })?;

    Ok(Json(teacher.into()))
}

#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Teacher deleted and unassigned from classes"),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = TeacherService::delete(&state.db, id).await;
    announce(&state.notifier, "delete teacher", result, |_| {
        "Teacher deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
