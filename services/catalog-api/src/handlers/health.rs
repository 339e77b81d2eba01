//! Health and root handlers

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the movie catalog API!"
}

/// GET /health - liveness probe
pub async fn health() -> &'static str {
    "OK"
}

/// GET /ready - readiness probe (checks database connectivity)
pub async fn ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        })?;
    Ok("READY")
}
