use crate::{doc::ApiDoc, error::ApiError, notifications::Notifier, state::AppState};
use axum::{Router, routing::get};
use database::error::ServiceError;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod classes;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod health;
pub mod notifications;
pub mod reference;
pub mod root;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod terms;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/notifications", get(notifications::notifications))
        .route(
            "/academic-years",
            get(reference::list_academic_years).post(reference::create_academic_year),
        )
        .route(
            "/academic-years/current",
            get(reference::current_academic_year),
        )
        .route(
            "/fee-types",
            get(reference::list_fee_types).post(reference::create_fee_type),
        )
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{id}",
            get(students::get_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/teachers",
            get(teachers::list_teachers).post(teachers::create_teacher),
        )
        .route(
            "/teachers/{id}",
            get(teachers::get_teacher)
                .patch(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        )
        .route(
            "/subjects",
            get(subjects::list_subjects).post(subjects::create_subject),
        )
        .route(
            "/subjects/{id}",
            get(subjects::get_subject)
                .patch(subjects::update_subject)
                .delete(subjects::delete_subject),
        )
        .route(
            "/classes",
            get(classes::list_classes).post(classes::create_class),
        )
        .route(
            "/classes/{id}",
            get(classes::get_class)
                .patch(classes::update_class)
                .delete(classes::delete_class),
        )
        .route("/terms", get(terms::list_terms).post(terms::create_term))
        .route(
            "/terms/{id}",
            get(terms::get_term)
                .patch(terms::update_term)
                .delete(terms::delete_term),
        )
        .route("/exams", get(exams::list_exams).post(exams::create_exam))
        .route(
            "/exams/{id}",
            get(exams::get_exam)
                .patch(exams::update_exam)
                .delete(exams::delete_exam),
        )
        .route("/fees", get(fees::list_fees).post(fees::create_fee))
        .route(
            "/fees/{id}",
            get(fees::get_fee)
                .patch(fees::update_fee)
                .delete(fees::delete_fee),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Publishes a notice for the outcome of a mutation and hands the outcome back
pub(crate) fn announce<T>(
    notifier: &Notifier,
    action: &str,
    result: Result<T, ServiceError>,
    on_success: impl FnOnce(&T) -> String,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => {
            notifier.success(on_success(&value));
            Ok(value)
        }
        Err(err) => {
            let err = ApiError::from(err);
            notifier.error(format!("Failed to {action}: {}", err.message()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        AppState::new(db, Notifier::new(16))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn subject(code: &str, name: &str) -> Value {
        json!({ "code": code, "name": name, "category": "Core" })
    }

    fn teacher(employee_id: &str, subjects: &[&str]) -> Value {
        json!({
            "employee_id": employee_id,
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@school.test",
            "designation": "Teacher",
            "qualification": "MSc",
            "joining_date": "2024-08-01",
            "subjects": subjects,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(test_state().await);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_create_then_list_subjects() {
        let app = router(test_state().await);

        let (status, created) = send(&app, "POST", "/subjects", Some(subject("MATH", "Mathematics"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Mathematics");

        let (status, listed) = send(&app, "GET", "/subjects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_teacher_lifecycle_with_subjects() {
        let state = test_state().await;
        let mut notices = state.notifier.subscribe();
        let app = router(state);
        send(&app, "POST", "/subjects", Some(subject("ENG", "English"))).await;
        notices.next().await.unwrap();

        let (status, created) = send(&app, "POST", "/teachers", Some(teacher("T-1", &["English"]))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["subjects"], json!(["English"]));
        assert_eq!(created["full_name"], "Jane Doe");
        assert_eq!(
            notices.next().await.unwrap().message,
            "Teacher Jane Doe created successfully"
        );

        let id = created["id"].as_str().unwrap().to_string();
        let (status, updated) = send(
            &app,
            "PATCH",
            &format!("/teachers/{id}"),
            Some(json!({ "subjects": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["subjects"], json!([]));

        let (status, _) = send(&app, "DELETE", &format!("/teachers/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/teachers/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_unknown_subject_is_rejected() {
        let state = test_state().await;
        let mut notices = state.notifier.subscribe();
        let app = router(state);

        let (status, body) = send(&app, "POST", "/teachers", Some(teacher("T-1", &["Latin"]))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "unresolved_association");
        let notice = notices.next().await.unwrap();
        assert_eq!(notice.kind, crate::notifications::NoticeKind::Error);
        assert!(notice.message.contains("Latin"));

        let (_, listed) = send(&app, "GET", "/teachers", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_requests() {
        let app = router(test_state().await);

        let (status, body) = send(&app, "POST", "/subjects", Some(subject("", "Mathematics"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
    }

    #[tokio::test]
    async fn test_dashboard_starts_empty() {
        let app = router(test_state().await);

        let (status, body) = send(&app, "GET", "/dashboard/stats", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_students"], 0);
        assert_eq!(body["fees_collected"], 0.0);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = router(test_state().await);

        let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/teachers/{id}"].is_object());
    }
}
