//! API error taxonomy and response mapping.
//!
//! Every failure surfaced to a client is one of four kinds: NotFound,
//! ValidationError, Conflict, or InternalServerError. Internal faults are
//! logged with full context server-side; the client receives a generic
//! message with a correlation id and no internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::request_id::current_request_id;
use crate::repository::DieselError;

/// Standard error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A referenced entity does not resolve.
    #[error("{0}")]
    NotFound(String),

    /// Malformed body, out-of-range value, or failed cross-field rule.
    #[error("{message}")]
    Validation {
        message: String,
        detail: Option<serde_json::Value>,
    },

    /// Uniqueness violation, detected by pre-check or storage constraint.
    #[error("{0}")]
    Conflict(String),

    /// Any unexpected fault.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            detail: None,
        }
    }

    pub fn validation_with_detail(
        message: impl Into<String>,
        detail: serde_json::Value,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            detail: Some(detail),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Map database faults to the API taxonomy. A unique-constraint violation
/// is the storage layer vetoing a duplicate that slipped past the
/// application-level pre-check, so it surfaces as the same Conflict kind.
impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => ApiError::Conflict("Resource with the same unique name already exists".to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message, detail) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "NotFound", message, None),
            ApiError::Validation { message, detail } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ValidationError",
                message,
                detail,
            ),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, "Conflict", message, None),
            ApiError::Internal(err) => {
                tracing::error!(
                    error = %err,
                    request_id = current_request_id().as_deref().unwrap_or("unknown"),
                    "internal server error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: kind.to_string(),
            message,
            detail,
            request_id: current_request_id(),
        };
        (status, Json(body)).into_response()
    }
}
