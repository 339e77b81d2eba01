//! Mock repositories for testing
//!
//! In-memory `UserRepository` matching the Postgres implementation's
//! semantics: a uniqueness constraint on username and set-like favorites.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use reel_db::{DbError, DbResult, NewUser, UpdateUser, UserRecord, UserRepository, UserRow};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<String, UserRow>>,
    favorites: Arc<DashMap<Uuid, Vec<Uuid>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, row: UserRow) -> UserRecord {
        let favorites = self
            .favorites
            .get(&row.id)
            .map(|f| f.value().clone())
            .unwrap_or_default();
        UserRecord {
            user: row,
            favorites,
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRecord>> {
        Ok(self
            .users
            .get(username)
            .map(|r| self.record(r.value().clone())))
    }

    async fn create(&self, user: NewUser) -> DbResult<UserRecord> {
        if self.users.contains_key(&user.username) {
            return Err(DbError::UniqueViolation);
        }
        let row = UserRow {
            id: user.id,
            username: user.username.clone(),
            password_hash: user.password_hash,
            email: user.email,
            birthday: user.birthday,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.insert(user.username, row.clone());
        Ok(self.record(row))
    }

    async fn update(&self, username: &str, fields: UpdateUser) -> DbResult<Option<UserRecord>> {
        let Some((_, mut row)) = self.users.remove(username) else {
            return Ok(None);
        };
        if fields.username != username && self.users.contains_key(&fields.username) {
            // Put the original back before failing, like a rejected statement
            self.users.insert(row.username.clone(), row);
            return Err(DbError::UniqueViolation);
        }
        row.username = fields.username.clone();
        row.password_hash = fields.password_hash;
        row.email = fields.email;
        row.birthday = fields.birthday;
        row.updated_at = Utc::now();
        self.users.insert(fields.username, row.clone());
        Ok(Some(self.record(row)))
    }

    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> DbResult<Option<UserRecord>> {
        let Some(row) = self.users.get(username).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        let mut favorites = self.favorites.entry(row.id).or_default();
        // Set semantics, same as the composite primary key in Postgres
        if !favorites.contains(&movie_id) {
            favorites.push(movie_id);
        }
        drop(favorites);
        Ok(Some(self.record(row)))
    }

    async fn remove_favorite(
        &self,
        username: &str,
        movie_id: Uuid,
    ) -> DbResult<Option<UserRecord>> {
        let Some(row) = self.users.get(username).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        if let Some(mut favorites) = self.favorites.get_mut(&row.id) {
            favorites.retain(|id| *id != movie_id);
        }
        Ok(Some(self.record(row)))
    }

    async fn delete(&self, username: &str) -> DbResult<bool> {
        match self.users.remove(username) {
            Some((_, row)) => {
                self.favorites.remove(&row.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
