//! Error types for the campus event backend.
//!
//! One domain error enum covers every operation; `IntoResponse` maps
//! it onto the HTTP surface so handlers can return `Result<_, Error>`
//! directly. Uniqueness conflicts on identity, registration, and
//! feedback are resolved inside the storage layer and never reach
//! this taxonomy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Domain error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input; rejected before any write (400).
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist (404).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The event has no remaining capacity (400).
    #[error("Event is full")]
    CapacityExceeded,

    /// Storage-level failure (500); the message is logged, not leaked.
    #[error("database error: {0}")]
    Database(String),
}

impl Error {
    /// Build a validation error for a missing required field.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }

    /// Machine-readable error code for the client.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::Database(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::CapacityExceeded => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: &'static str,
    /// Human-readable error message.
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Log internal errors with detail; clients get a generic message.
        let message = if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            code,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = Error::missing_field("title");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "title is required");
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn capacity_exceeded_is_a_client_error() {
        assert_eq!(Error::CapacityExceeded.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::CapacityExceeded.to_string(), "Event is full");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = Error::NotFound("Event");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Event not found");
    }

    #[test]
    fn database_errors_map_to_500() {
        let err = Error::Database("connection refused".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
