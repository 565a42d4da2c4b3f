use super::announce;
use crate::{
    dtos::academics::ClassResponse,
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::class::{ClassChanges, ClassRecord, ClassService, NewClass};
use uuid::Uuid;

fn label(record: &ClassRecord) -> String {
    format!("{} {}", record.class.name, record.class.section)
}

/// List classes by grade, name and section
#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "Classes with teacher and subjects", body = [ClassResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassResponse>>, ApiError> {
    let classes = ClassService::list(&state.db).await?;
    Ok(Json(classes.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class found", body = ClassResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes"
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassResponse>, ApiError> {
    let class = ClassService::get(&state.db, id).await?;
    Ok(Json(class.into()))
}

/// Create a class and link the named subjects.
///
/// Without an `academic_year_id` the class joins the current academic year.
#[utoipa::path(
    post,
    path = "/classes",
    request_body = NewClass,
    responses(
        (status = 201, description = "Class created", body = ClassResponse),
        (status = 400, description = "Invalid class", body = ErrorResponse),
        (status = 422, description = "Unknown subject names", body = ErrorResponse)
    ),
    tag = "Classes"
)]
pub async fn create_class(
    State(state): State<AppState>,
    Json(input): Json<NewClass>,
) -> Result<(StatusCode, Json<ClassResponse>), ApiError> {
    let result = ClassService::create(&state.db, input).await;
    let class = announce(&state.notifier, "create class", result, |record| {
        format!("Class {} created successfully", label(record))
    })?;

    Ok((StatusCode::CREATED, Json(class.into())))
}

#[utoipa::path(
    patch,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = ClassChanges,
    responses(
        (status = 200, description = "Class updated", body = ClassResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 422, description = "Unknown subject names", body = ErrorResponse)
    ),
    tag = "Classes"
)]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<ClassChanges>,
) -> Result<Json<ClassResponse>, ApiError> {
    let result = ClassService::update(&state.db, id, changes).await;
    let class = announce(&state.notifier, "update class", result, |record| {
        format!("Class {} updated successfully", label(record))
    })?;

    Ok(Json(class.into()))
}

/// Delete a class. Its students are unassigned and its exams removed.
#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes"
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = ClassService::delete(&state.db, id).await;
    announce(&state.notifier, "delete class", result, |_| {
        "Class deleted successfully".to_string()
    })?;

    Ok(StatusCode::NO_CONTENT)
}
