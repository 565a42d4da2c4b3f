use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable kind: `validation`, `not_found`, `unresolved_association` or `store`
    pub error: String,
    pub message: String,
}

/// A service failure on its way to the client
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::UnresolvedAssociation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to users. Store details stay in the logs.
    pub fn message(&self) -> String {
        match &self.0 {
            ServiceError::Store(_) => "The request could not be completed, please try again".into(),
            other => other.to_string(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ServiceError::Store(err) = &self.0 {
            error!("Database error: {err}");
        }

        let body = ErrorResponse {
            error: self.0.kind().to_string(),
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ServiceError::validation("email", "must contain '@'"),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::not_found("teacher", Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::UnresolvedAssociation {
                    names: vec!["Latin".to_string()],
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::Store(DbErr::Custom("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_store_details_are_not_echoed() {
        let err = ApiError::from(DbErr::Custom("password authentication failed".to_string()));

        assert!(!err.message().contains("password"));
    }

    #[test]
    fn test_into_response_uses_mapped_status() {
        let response = ApiError::from(ServiceError::validation("name", "is required")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
