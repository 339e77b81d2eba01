//! Auth errors

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Registration or profile input failed format rules
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Username already taken
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// Wrong username or password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid token (malformed, bad signature, wrong algorithm)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reel_db::DbError> for AuthError {
    fn from(err: reel_db::DbError) -> Self {
        match err {
            reel_db::DbError::NotFound => Self::UserNotFound,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Database(other.to_string())
            }
        }
    }
}
