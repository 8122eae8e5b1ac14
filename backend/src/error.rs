//! Error handling for the Partner Management Platform
//!
//! Provides consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::EstimateError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<(&'static str, &'static str)> for AppError {
    fn from((field, message): (&'static str, &'static str)) -> Self {
        AppError::invalid_field(field, message)
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::InvalidInput(field) => {
                AppError::invalid_field(field, &format!("Invalid value for {}", field))
            }
            EstimateError::NotFound(resource) => AppError::NotFound(resource.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Validation failure on a single named field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Unique-constraint violations become `DuplicateEntry(field)`; any
    /// other driver error stays a `DatabaseError`
    pub fn unique_violation_as(err: sqlx::Error, field: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return AppError::DuplicateEntry(field.to_string());
            }
        }
        AppError::DatabaseError(err)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEntry(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::MalformedRequest(_) => "MALFORMED_REQUEST",
            AppError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn detail(&self) -> ErrorDetail {
        let (message, field) = match self {
            AppError::Validation { field, message } => (message.clone(), Some(field.clone())),
            AppError::MalformedRequest(msg) | AppError::Internal(msg) => (msg.clone(), None),
            AppError::DuplicateEntry(field) => (
                format!("A record with this {} already exists", field),
                Some(field.clone()),
            ),
            AppError::NotFound(resource) => (format!("{} not found", resource), None),
            // Driver messages stay in the log
            AppError::DatabaseError(_) => ("A database error occurred".to_string(), None),
        };
        ErrorDetail {
            code: self.code().to_string(),
            message,
            field,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: self.detail() })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_errors_map_to_distinct_statuses() {
        let invalid: AppError = EstimateError::InvalidInput("param1").into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let missing: AppError = EstimateError::NotFound("Product type").into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_entry_reports_field() {
        let err = AppError::DuplicateEntry("article".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let detail = err.detail();
        assert_eq!(detail.code, "DUPLICATE_ENTRY");
        assert_eq!(detail.field.as_deref(), Some("article"));
    }

    #[derive(Debug, Error)]
    #[error("duplicate key value violates unique constraint")]
    struct UniqueViolation;

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = AppError::unique_violation_as(
            sqlx::Error::Database(Box::new(UniqueViolation)),
            "article",
        );
        assert!(matches!(&err, AppError::DuplicateEntry(field) if field == "article"));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let other = AppError::unique_violation_as(sqlx::Error::RowNotFound, "article");
        assert_eq!(other.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_field_validation_tuple() {
        let err: AppError = ("rating", "Rating must be a non-negative number").into();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "rating"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
