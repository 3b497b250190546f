//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Postgres SQLSTATE for `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Coarse failure classification handlers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    StoreUnavailable,
    Conflict,
    Internal,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::ValidationFailed,
            AppError::Unavailable(_) => ErrorKind::StoreUnavailable,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Database(e) => match e {
                sqlx::Error::RowNotFound => ErrorKind::NotFound,
                sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                    ErrorKind::Conflict
                }
                sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed => ErrorKind::StoreUnavailable,
                _ => ErrorKind::Internal,
            },
            AppError::Template(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: u16,
    pub error: ErrorKind,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match kind {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ErrorKind::ValidationFailed => (StatusCode::BAD_REQUEST, self.to_string()),
            ErrorKind::Conflict => (StatusCode::CONFLICT, self.to_string()),
            ErrorKind::StoreUnavailable => {
                tracing::error!("Store unavailable: {:?}", self);
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable".to_string())
            }
            ErrorKind::Internal => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            error: kind,
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
