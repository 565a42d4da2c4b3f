use super::announce;
use crate::{
    dtos::people::StudentResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::student::{NewStudent, StudentChanges, StudentService};
use uuid::Uuid;

/// List students, newest first
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "Students with their class", body = [StudentResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = StudentService::list(&state.db).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentService::get(&state.db, id).await?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    post,
    path = "/students",
    request_body = NewStudent,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid student", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<NewStudent>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let result = StudentService::create(&state.db, input).await;
    let student = announce(&state.notifier, "add student", result, |record| {
        format!("Student {} added successfully", record.student.full_name())
    })?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

#[utoipa::path(
    patch,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = StudentChanges,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<StudentChanges>,
) -> Result<Json<StudentResponse>, ApiError> {
    let result = StudentService::update(&state.db, id, changes).await;
    let student = announce(&state.notifier, "update student", result, |record| {
        format!("Student {} updated successfully", record.student.full_name())
    })?;

    Ok(Json(student.into()))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student and their fees deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = StudentService::delete(&state.db, id).await;
    announce(&state.notifier, "delete student", result, |_| {
        "Student deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
