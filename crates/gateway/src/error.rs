//! Boundary error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP callers.
///
/// The taxonomy is two-valued at the boundary: a lookup, mutation, or
/// deletion that matched no rows is `NotFound`; everything else maps to
/// an internal failure. Callers receive a single status code and a short
/// `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No rows matched the targeted id.
    #[error("{0}")]
    NotFound(String),

    /// An expected-to-succeed write returned no confirming row.
    #[error("{0}")]
    Internal(String),

    /// The persistence client failed outright.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = %status, detail = %detail, "Request failed");
        } else {
            warn!(status = %status, detail = %detail, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_not_found_status() {
        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Task not found");
    }

    #[test]
    fn test_internal_status() {
        let err = ApiError::Internal("Failed to add task".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to add task");
    }

    #[test]
    fn test_upstream_status() {
        let err = ApiError::from(anyhow!("connection refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("Task not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Internal("Failed to add task".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
