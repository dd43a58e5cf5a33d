//! Custom error types for the cart service

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use thiserror::Error;
use tracing::error;

use crate::models::ApiResponse;

/// Custom error type for the cart service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad input: missing or invalid fields, unknown references
    #[error("Validation error: {0}")]
    Validation(String),

    /// The addressed entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique field collides with an existing row
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
            ApiError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::NOT_FOUND,
            ApiError::Database(DatabaseError::OutOfRange(_)) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => msg,
            ApiError::Database(DatabaseError::UniqueViolation(constraint)) => {
                tracing::warn!("Unique constraint {} rejected write", constraint);
                "Resource already exists.".to_string()
            }
            ApiError::Database(DatabaseError::ForeignKeyViolation(constraint)) => {
                tracing::warn!("Foreign key {} rejected write", constraint);
                "Referenced user or product not found.".to_string()
            }
            ApiError::Database(DatabaseError::OutOfRange(detail)) => {
                tracing::warn!("Write rejected as out of range: {}", detail);
                "Quantity too large.".to_string()
            }
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                "An error happened.".to_string()
            }
        };

        ApiResponse::error(status, message).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
