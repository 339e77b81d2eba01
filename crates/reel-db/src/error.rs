//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// A uniqueness constraint rejected the write
    #[error("unique constraint violation")]
    UniqueViolation,

    /// Record not found
    #[error("record not found")]
    NotFound,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation;
            }
        }
        Self::Sqlx(err)
    }
}

/// Result alias for database operations
pub type DbResult<T> = Result<T, DbError>;
