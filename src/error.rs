//! Error types for the content service
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these cover the collaborators and the HTTP layer.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Requested entity does not exist (or belongs to someone else)
    #[error("Not found: {0}")]
    NotFound(String),

    /// No valid session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed input
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The external backend returned an error
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Extractor Rejections ==
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status().is_server_error() {
            AppError::Internal(rejection.body_text())
        } else {
            AppError::ValidationFailed(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        if rejection.status().is_server_error() {
            AppError::Internal(rejection.body_text())
        } else {
            AppError::ValidationFailed(rejection.body_text())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the content service.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ValidationFailed("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_human_readable() {
        let err = AppError::ValidationFailed("mood must be one of hopeful, calm".into());
        assert_eq!(err.to_string(), "Validation failed: mood must be one of hopeful, calm");
    }

    #[test]
    fn test_query_rejection_is_validation_failure() {
        #[derive(Debug, serde::Deserialize)]
        struct Ttl {
            #[allow(dead_code)]
            ttl: u64,
        }

        let uri: axum::http::Uri = "/sign?ttl=soon".parse().unwrap();
        let rejection = axum::extract::Query::<Ttl>::try_from_uri(&uri).unwrap_err();

        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::ValidationFailed(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("Section 'intro'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
