use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by the entity services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A field is missing or malformed; nothing was written
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Subject names that match no row in `subjects`; nothing was written
    #[error("unknown subjects: {}", .names.join(", "))]
    UnresolvedAssociation { names: Vec<String> },

    #[error("database error: {0}")]
    Store(#[from] DbErr),
}

impl ServiceError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::UnresolvedAssociation { .. } => "unresolved_association",
            Self::Store(_) => "store",
        }
    }
}
