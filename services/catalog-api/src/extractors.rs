//! Axum extractors for authentication
//!
//! `AuthUser` is the request-level guard: it pulls the bearer credential
//! from the Authorization header, verifies it, and hands the resolved
//! principal to the handler. Every failure collapses to one uniform 401.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::error::{ErrorDetail, ErrorResponse};
use crate::state::AppState;

/// Authenticated principal extracted from the request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

impl AuthUser {
    /// Check that this principal owns the user-scoped resource at `username`
    pub fn owns(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Uniform auth rejection: one body for missing, malformed, invalid, and
/// expired credentials alike.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: "UNAUTHENTICATED".to_string(),
                message: "authentication required".to_string(),
                details: None,
            },
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts).ok_or(AuthRejection)?;

        let claims = app_state.accounts.verify_token(token).map_err(|e| {
            tracing::debug!(error = ?e, "Token verification failed");
            AuthRejection
        })?;

        Ok(Self {
            user_id: claims.uid,
            username: claims.sub,
        })
    }
}

/// Extract the bearer credential from the Authorization header
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
