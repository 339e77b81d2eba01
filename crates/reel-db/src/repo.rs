//! Repository traits
//!
//! Define async repository interfaces for database operations. The user
//! repository is keyed by username because every user-facing operation
//! addresses accounts that way.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRecord>>;

    /// Create a new user.
    ///
    /// The UNIQUE index on `username` rejects collisions atomically; callers
    /// see `DbError::UniqueViolation` rather than racing a read-then-insert.
    async fn create(&self, user: NewUser) -> DbResult<UserRecord>;

    /// Replace a user's profile fields wholesale.
    ///
    /// Every field is overwritten; an absent birthday clears the column.
    /// Returns `None` when no such username exists.
    async fn update(&self, username: &str, fields: UpdateUser) -> DbResult<Option<UserRecord>>;

    /// Add a movie to the user's favorite set. Idempotent.
    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> DbResult<Option<UserRecord>>;

    /// Remove a movie from the user's favorite set.
    async fn remove_favorite(&self, username: &str, movie_id: Uuid)
        -> DbResult<Option<UserRecord>>;

    /// Delete a user record. Returns false when no such username exists.
    async fn delete(&self, username: &str) -> DbResult<bool>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Wholesale profile replacement input
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Read-only catalog repository trait
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all movies with genre, director, and actors expanded
    async fn list_movies(&self) -> DbResult<Vec<MovieRecord>>;

    /// Find a movie by title (first match; titles are not unique)
    async fn find_movie_by_title(&self, title: &str) -> DbResult<Option<MovieRecord>>;

    /// List all genres
    async fn list_genres(&self) -> DbResult<Vec<GenreRow>>;

    /// Find a genre by name
    async fn find_genre_by_name(&self, name: &str) -> DbResult<Option<GenreRow>>;

    /// List all directors
    async fn list_directors(&self) -> DbResult<Vec<DirectorRow>>;

    /// Find a director by name
    async fn find_director_by_name(&self, name: &str) -> DbResult<Option<DirectorRow>>;

    /// List all actors
    async fn list_actors(&self) -> DbResult<Vec<ActorRow>>;

    /// Find an actor by name
    async fn find_actor_by_name(&self, name: &str) -> DbResult<Option<ActorRow>>;
}
