//! Error types for the gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Gateway Error Enum ==
/// Unified error type for the gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Client-credentials exchange was rejected
    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),

    /// Upstream data endpoint answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// Upstream call exceeded its timeout
    #[error("Upstream request timed out: {0}")]
    UpstreamTimeout(String),

    /// Upstream could not be reached or answered with garbage
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status surfaced to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamAuth(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamHttp { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::UpstreamTimeout(err.to_string())
        } else {
            GatewayError::UpstreamUnavailable(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            GatewayError::UpstreamHttp { body, .. } => body,
            GatewayError::UpstreamAuth(_) => "Failed to get upstream token".to_string(),
            GatewayError::NotFound(msg)
            | GatewayError::InvalidRequest(msg)
            | GatewayError::UpstreamTimeout(msg)
            | GatewayError::UpstreamUnavailable(msg)
            | GatewayError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
