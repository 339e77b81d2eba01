//! User account handlers (register, profile, favorites, deregister)
//!
//! Every user-scoped route requires the authenticated principal to match the
//! `{Username}` path parameter; any authenticated user reading or mutating
//! another account gets 403.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reel_auth_core::{ProfileUpdate, Registration};
use reel_db::{UserRecord, UserRepository};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Registration and profile-update body, original wire format.
///
/// Updates replace the profile wholesale: an absent `Birthday` clears the
/// stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserBody {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// User as serialized on the wire.
///
/// `Password` carries the bcrypt hash, never the plaintext; the original API
/// exposed the stored document verbatim and clients depend on the shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub favorite_movies: Vec<Uuid>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.user.id,
            username: record.user.username,
            password: record.user.password_hash,
            email: record.user.email,
            birthday: record.user.birthday,
            favorite_movies: record.favorites,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /users
///
/// Self-registration; the only unauthenticated write in the API.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<UserBody>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let record = state
        .accounts
        .register(Registration {
            username: body.username,
            password: body.password,
            email: body.email,
            birthday: body.birthday,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /users/{Username}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<Option<UserResponse>>> {
    ensure_owner(&auth, &username)?;

    let record = state.repos.users.find_by_username(&username).await?;
    Ok(Json(record.map(UserResponse::from)))
}

/// PUT /users/{Username}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(body): Json<UserBody>,
) -> ApiResult<Json<UserResponse>> {
    ensure_owner(&auth, &username)?;

    let record = state
        .accounts
        .update_profile(
            &username,
            ProfileUpdate {
                username: body.username,
                password: body.password,
                email: body.email,
                birthday: body.birthday,
            },
        )
        .await?;

    Ok(Json(record.into()))
}

/// POST /users/{Username}/movies/{MovieID}
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<UserResponse>> {
    ensure_owner(&auth, &username)?;

    let record = state
        .repos
        .users
        .add_favorite(&username, movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(username))?;

    Ok(Json(record.into()))
}

/// DELETE /users/{Username}/movies/{MovieID}
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<UserResponse>> {
    ensure_owner(&auth, &username)?;

    let record = state
        .repos
        .users
        .remove_favorite(&username, movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(username))?;

    Ok(Json(record.into()))
}

/// DELETE /users/{Username}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<String> {
    ensure_owner(&auth, &username)?;

    if state.repos.users.delete(&username).await? {
        Ok(format!("{username} was deleted."))
    } else {
        Err(ApiError::NotFound(username))
    }
}

/// Principal-matches-resource check for user-scoped operations
fn ensure_owner(auth: &AuthUser, username: &str) -> Result<(), ApiError> {
    if auth.owns(username) {
        Ok(())
    } else {
        tracing::debug!(
            principal = %auth.username,
            target = %username,
            "Cross-account access denied"
        );
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(username: &str) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_owner_allowed() {
        assert!(ensure_owner(&auth("abc12345"), "abc12345").is_ok());
    }

    #[test]
    fn test_other_principal_forbidden() {
        let result = ensure_owner(&auth("abc12345"), "someoneelse");
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[test]
    fn test_username_comparison_is_exact() {
        assert!(ensure_owner(&auth("abc12345"), "ABC12345").is_err());
    }
}
