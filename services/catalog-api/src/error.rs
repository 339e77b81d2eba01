//! Error types for the catalog API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use reel_auth_core::AuthError;
use reel_db::DbError;

/// API error response envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("{0} already exists")]
    DuplicateUsername(String),

    /// Uniform response for missing, malformed, invalid, or expired
    /// credentials; the specific failure kind is never leaked.
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    /// Kept on the original 400 mapping rather than 404.
    #[error("{0} was not found")]
    NotFound(String),

    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DuplicateUsername(_) | Self::NotFound(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateUsername(_) => "DUPLICATE_USERNAME",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => Self::Validation(errors),
            AuthError::DuplicateUsername(name) => Self::DuplicateUsername(name),
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::TokenExpired => {
                Self::Unauthenticated
            }
            AuthError::UserNotFound => Self::NotFound("user".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // The underlying cause stays server-side
        if let Self::Internal(cause) = &self {
            tracing::error!(error = %cause, "Internal API error");
        }

        let details = match &self {
            Self::Validation(errors) => Some(serde_json::json!(errors)),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::DuplicateUsername("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_errors_collapse_to_unauthenticated() {
        // All token failure kinds map to the same response
        for err in [
            AuthError::InvalidCredentials,
            AuthError::InvalidToken,
            AuthError::TokenExpired,
        ] {
            let api: ApiError = err.into();
            assert_eq!(api.error_code(), "UNAUTHENTICATED");
            assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let api = ApiError::Internal("connection refused at 10.0.0.5".into());
        assert_eq!(api.to_string(), "internal error");
    }
}
