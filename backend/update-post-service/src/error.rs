/// Error types for Update Post Service
///
/// Every failure of a request ends up here and is turned into an HTTP response
/// by the `ResponseError` impl. Callers can tell "not your post" (403) from
/// "malformed request" (400) from "your update failed" (5xx), and the `code`
/// and `retryable` fields tell transient store failures apart from permanent ones.
use crate::db::StoreError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for update-post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// No usable caller identity on the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request body is not a valid post
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Caller does not own the post
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The store rejected or failed the update
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Response could not be encoded
    #[error("Internal serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::InvalidBody(_) => "invalid_request_body",
            AppError::Forbidden(_) => "forbidden",
            AppError::Store(StoreError::NotFound(_)) => "store_item_not_found",
            AppError::Store(StoreError::Retryable(_)) => "store_retryable_failure",
            AppError::Store(StoreError::Permanent(_)) => "store_permanent_failure",
            AppError::Serialization(_) => "serialization_failure",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Store(err) if err.is_retryable())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Store(StoreError::Retryable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(_) | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
            "code": self.code(),
            "retryable": self.is_retryable(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_separate_caller_faults_from_store_faults() {
        assert_eq!(
            AppError::InvalidBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("no claims".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("not yours".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::from(StoreError::Retryable("throttled".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(StoreError::Permanent("access denied".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(StoreError::NotFound("alice/m1".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Serialization("bad float".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_retryable_store_errors_are_retryable() {
        assert!(AppError::from(StoreError::Retryable("timeout".into())).is_retryable());
        assert!(!AppError::from(StoreError::NotFound("alice/m1".into())).is_retryable());
        assert!(!AppError::Forbidden("not yours".into()).is_retryable());
    }

    #[test]
    fn test_codes() {
        assert_eq!(AppError::InvalidBody("x".into()).code(), "invalid_request_body");
        assert_eq!(
            AppError::from(StoreError::NotFound("x".into())).code(),
            "store_item_not_found"
        );
        assert_eq!(
            AppError::from(StoreError::Retryable("x".into())).code(),
            "store_retryable_failure"
        );
    }
}
