//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and its
//! translation into JSON error responses at the route boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ConfigError;
use newsdesk_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON body used for every error response. The client renders the
/// `error` field directly in its result panel.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::Port(port_error) => match port_error {
                PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                PortError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
                PortError::Conflict(msg) => (StatusCode::CONFLICT, msg),
                PortError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
                PortError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
                PortError::Provider(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
                PortError::Unexpected(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            },
            ApiError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Shorthand for the 400 responses produced by request validation.
pub fn bad_request(message: &str) -> ApiError {
    ApiError::Port(PortError::InvalidInput(message.to_string()))
}

/// Shorthand for the 404 responses produced by filename resolution.
pub fn not_found(message: &str) -> ApiError {
    ApiError::Port(PortError::NotFound(message.to_string()))
}

pub fn unauthorized(message: &str) -> ApiError {
    ApiError::Port(PortError::Unauthorized(message.to_string()))
}

pub fn forbidden(message: &str) -> ApiError {
    ApiError::Port(PortError::Forbidden(message.to_string()))
}
