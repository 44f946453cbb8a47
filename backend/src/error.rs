//! Error handling for the FIFO ledger service
//!
//! Every failure leaves the service as a JSON envelope
//! `{ "error": { "code", "message", "field"? } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FifoError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Conflicts
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Ledger errors
    #[error("Inconsistent ledger: {0}")]
    InconsistentLedger(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<FifoError> for AppError {
    fn from(err: FifoError) -> Self {
        match err {
            FifoError::InconsistentLedger { .. } => AppError::InconsistentLedger(err.to_string()),
            FifoError::AmountOutOfRange => AppError::AmountOutOfRange(err.to_string()),
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

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry(resource) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message: format!("{} already exists", resource),
                    field: Some("name".to_string()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::InconsistentLedger(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "INCONSISTENT_LEDGER".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::AmountOutOfRange(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "AMOUNT_OUT_OF_RANGE".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_errors_map_to_client_errors() {
        let inconsistent = AppError::from(FifoError::InconsistentLedger {
            sold: 2,
            purchased: 1,
        });
        assert_eq!(inconsistent.into_response().status(), StatusCode::CONFLICT);

        let out_of_range = AppError::from(FifoError::AmountOutOfRange);
        assert!(matches!(out_of_range, AppError::AmountOutOfRange(_)));
        assert_eq!(
            out_of_range.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
