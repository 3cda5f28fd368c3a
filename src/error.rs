//! Application error type and its HTTP mapping.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_unique_violation_on_code;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Crate-wide error type shared by the store, the generator and the HTTP layer.
///
/// `NotFound` is kept distinct from the storage variants so callers can tell an
/// unknown short code apart from an infrastructure failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Insert hit the unique index on the short code.
    #[error("Short code already exists: {code}")]
    DuplicateCode { code: String },

    /// The secure random source could not be read.
    #[error("Entropy source unavailable: {0}")]
    GenerationFault(String),

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for faults of the backing store (including timeouts).
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Timeout(_))
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::DuplicateCode { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::GenerationFault(_) => (StatusCode::INTERNAL_SERVER_ERROR, "generation_fault"),
            AppError::Timeout(_) | AppError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Builds the serializable error payload without consuming the error.
    ///
    /// Storage details are not exposed to clients.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
            AppError::DuplicateCode { code } => (self.to_string(), json!({ "code": code })),
            AppError::GenerationFault(_) => ("Failed to generate short code".to_string(), json!({})),
            AppError::Timeout(_) | AppError::Storage(_) => {
                ("Database error".to_string(), json!({}))
            }
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a driver error raised while inserting `code`.
///
/// Only a unique violation on the short code column becomes
/// [`AppError::DuplicateCode`]; every other fault stays a storage error.
pub fn map_insert_error(e: sqlx::Error, code: &str) -> AppError {
    if is_unique_violation_on_code(&e) {
        return AppError::DuplicateCode {
            code: code.to_string(),
        };
    }

    AppError::Storage(e)
}
