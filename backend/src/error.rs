//! Error handling for the Ferry ETA Service
//!
//! Upstream feed failures are fatal to the request: HTTP-status errors
//! forward the upstream's status code, other transport errors map to
//! 502 Bad Gateway. Reasoning failures are recovered inside the pipeline
//! via fallback synthesis and normally never reach the boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// An upstream feed answered with a non-2xx HTTP status.
    #[error("{feed} returned HTTP {status}: {body}")]
    UpstreamStatus {
        feed: &'static str,
        status: u16,
        body: String,
    },

    /// An upstream feed could not be reached or returned garbage.
    #[error("Upstream error from {feed}: {message}")]
    Upstream {
        feed: &'static str,
        message: String,
    },

    /// The reasoning service failed or returned a non-conforming payload.
    #[error("Reasoning service unavailable: {0}")]
    Reasoning(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
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
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::UpstreamStatus { status, .. } => (
                // Bubble up the upstream HTTP status; fall back to 502 if
                // the feed sent something that is not a valid status code.
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorDetail {
                    code: "UPSTREAM_STATUS".to_string(),
                    message: self.to_string(),
                },
            ),
            AppError::Upstream { .. } => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: self.to_string(),
                },
            ),
            AppError::Reasoning(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "REASONING_UNAVAILABLE".to_string(),
                    message: self.to_string(),
                },
            ),
            AppError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: self.to_string(),
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: self.to_string(),
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_forwarded() {
        let err = AppError::UpstreamStatus {
            feed: "position feed",
            status: 503,
            body: "maintenance".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_upstream_status_falls_back_to_bad_gateway() {
        let err = AppError::UpstreamStatus {
            feed: "position feed",
            status: 42,
            body: String::new(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_transport_error_maps_to_bad_gateway() {
        let err = AppError::Upstream {
            feed: "weather feed",
            message: "connection refused".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
