use super::announce;
use crate::{
    dtos::academics::ExamResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::exam::{ExamChanges, ExamService, NewExam};
use uuid::Uuid;

/// List exams, latest first
#[utoipa::path(
    get,
    path = "/exams",
    responses(
        (status = 200, description = "Exams with subject and class", body = [ExamResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exams"
)]
pub async fn list_exams(State(state): State<AppState>) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let exams = ExamService::list(&state.db).await?;
    Ok(Json(exams.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam found", body = ExamResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Exams"
)]
pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamResponse>, ApiError> {
    let exam = ExamService::get(&state.db, id).await?;
    Ok(Json(exam.into()))
}

#[utoipa::path(
    post,
    path = "/exams",
    request_body = NewExam,
    responses(
        (status = 201, description = "Exam scheduled", body = ExamResponse),
        (status = 400, description = "Invalid exam", body = ErrorResponse)
    ),
    tag = "Exams"
)]
pub async fn create_exam(
    State(state): State<AppState>,
    Json(input): Json<NewExam>,
) -> Result<(StatusCode, Json<ExamResponse>), ApiError> {
    let result = ExamService::create(&state.db, input).await;
    let exam = announce(&state.notifier, "schedule exam", result, |record| {
        format!("Exam {} scheduled successfully", record.exam.name)
    })?;

    Ok((StatusCode::CREATED, Json(exam.into())))
}

#[utoipa::path(
    patch,
    path = "/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    request_body = ExamChanges,
    responses(
        (status = 200, description = "Exam updated", body = ExamResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Exams"
)]
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<ExamChanges>,
) -> Result<Json<ExamResponse>, ApiError> {
    let result = ExamService::update(&state.db, id, changes).await;
    let exam = announce(&state.notifier, "update exam", result, |record| {
        format!("Exam {} updated successfully", record.exam.name)
    })?;

    Ok(Json(exam.into()))
}

#[utoipa::path(
    delete,
    path = "/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 204, description = "Exam deleted"),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Exams"
)]
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = ExamService::delete(&state.db, id).await;
    announce(&state.notifier, "delete exam", result, |_| {
        "Exam deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
