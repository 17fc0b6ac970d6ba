use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No eligible entries: {0}")]
    NoEligibleEntries(String),

    #[error("Inconsistent state: {0}")]
    Inconsistency(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Wrap a storage failure with the operation and entity it happened in.
    ///
    /// Only storage-level kinds are rewritten; domain errors (not found,
    /// validation, ...) already describe the entity and pass through as-is.
    pub fn context(self, operation: &str) -> Self {
        match self {
            AppError::DatabaseError(msg) => AppError::DatabaseError(format!("{operation}: {msg}")),
            AppError::SerializationError(msg) => {
                AppError::SerializationError(format!("{operation}: {msg}"))
            }
            AppError::InternalError(msg) => AppError::InternalError(format!("{operation}: {msg}")),
            other => other,
        }
    }

    /// The bare message, without the kind prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(m)
            | AppError::NotFound(m)
            | AppError::InvalidInput(m)
            | AppError::ValidationError(m)
            | AppError::NoEligibleEntries(m)
            | AppError::Inconsistency(m)
            | AppError::SerializationError(m)
            | AppError::ServiceUnavailable(m)
            | AppError::InternalError(m) => m,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoEligibleEntries(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_)
            | AppError::Inconsistency(_)
            | AppError::SerializationError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn list_not_found(id: &uuid::Uuid) -> Self {
        AppError::NotFound(format!("List with ID {} not found", id))
    }

    pub fn entry_not_found(id: &uuid::Uuid) -> Self {
        AppError::NotFound(format!("Entry with ID {} not found", id))
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => AppError::NotFound("Record not found in database".to_string()),
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                AppError::NotFound(format!("Referenced record does not exist: {}", info.message()))
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::DatabaseError(format!("Database pool error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::DatabaseError(format!("Storage I/O error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Blocking task failed: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
