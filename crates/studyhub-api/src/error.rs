//! Maps domain `AppError` to HTTP responses.
//!
//! `AppError` and `IntoResponse` are both foreign to this crate, so the
//! mapping lives on a local wrapper. Handlers return `ApiError` and the
//! `From` impl keeps `?` working on `AppResult` values.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use studyhub_core::error::{AppError, ErrorKind};

/// HTTP-boundary wrapper around the domain error.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::UnknownTopic => (StatusCode::BAD_REQUEST, "UNKNOWN_TOPIC"),
            ErrorKind::UnknownEventKind => (StatusCode::BAD_REQUEST, "UNKNOWN_EVENT_KIND"),
            ErrorKind::MalformedEvent => (StatusCode::BAD_REQUEST, "MALFORMED_EVENT"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::TransportClosed => (StatusCode::GONE, "TRANSPORT_CLOSED"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::MailboxOverflow
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
