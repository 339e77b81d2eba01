//! Login handler

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::handlers::users::UserResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

/// POST /login
///
/// Verify credentials and issue a bearer token. Unknown username and wrong
/// password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (record, token) = state.accounts.login(&body.username, &body.password).await?;

    Ok(Json(LoginResponse {
        user: record.into(),
        token,
    }))
}
