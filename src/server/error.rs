//! API error types and response formatting.

use crate::error::RelayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for webhook handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error type with HTTP status code mapping.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Upstream failure (502)
    #[error("{message}")]
    BadGateway {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for machine parsing.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::BadGateway { .. } => "UPSTREAM_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::UpstreamStatus { status, body } => {
                // Keep JSON bodies structured so callers can read upstream error codes.
                let details = serde_json::from_str(&body)
                    .unwrap_or_else(|_| serde_json::Value::String(body));
                ApiError::BadGateway {
                    message: format!("upstream returned status {}", status),
                    details: Some(serde_json::json!({ "status": status, "body": details })),
                }
            }
            err if err.is_upstream() => {
                ApiError::BadGateway { message: err.to_string(), details: None }
            }
            err => ApiError::Internal(err.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for machine parsing
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.error_code().to_string();
        let message = self.to_string();
        let details = match self {
            ApiError::BadGateway { details, .. } => details,
            _ => None,
        };

        (status, Json(ErrorResponse { error, message, details })).into_response()
    }
}
