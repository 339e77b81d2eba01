//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{UserRecord, UserRow};
use crate::repo::{NewUser, UpdateUser, UserRepository};

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_favorites(&self, user_id: Uuid) -> DbResult<Vec<Uuid>> {
        let favorites = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT movie_id
            FROM user_favorites
            WHERE user_id = $1
            ORDER BY added_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    async fn load_record(&self, row: UserRow) -> DbResult<UserRecord> {
        let favorites = self.load_favorites(row.id).await?;
        Ok(UserRecord {
            user: row,
            favorites,
        })
    }

    async fn find_row(&self, username: &str) -> DbResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, email, birthday, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRecord>> {
        match self.find_row(username).await? {
            Some(row) => Ok(Some(self.load_record(row).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: NewUser) -> DbResult<UserRecord> {
        // The UNIQUE index on username turns a concurrent duplicate insert
        // into DbError::UniqueViolation instead of two winners.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, email, birthday)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, email, birthday, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(user.birthday)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserRecord {
            user: row,
            favorites: Vec::new(),
        })
    }

    async fn update(&self, username: &str, fields: UpdateUser) -> DbResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3, email = $4, birthday = $5,
                updated_at = now()
            WHERE username = $1
            RETURNING id, username, password_hash, email, birthday, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(&fields.username)
        .bind(&fields.password_hash)
        .bind(&fields.email)
        .bind(fields.birthday)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.load_record(row).await?)),
            None => Ok(None),
        }
    }

    async fn add_favorite(&self, username: &str, movie_id: Uuid) -> DbResult<Option<UserRecord>> {
        let Some(row) = self.find_row(username).await? else {
            return Ok(None);
        };

        // Set semantics: the composite primary key makes a repeated add a
        // no-op rather than a duplicate entry. No FK on movie_id; a favorite
        // may reference a movie that no longer exists.
        sqlx::query(
            r#"
            INSERT INTO user_favorites (user_id, movie_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(row.id)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(self.load_record(row).await?))
    }

    async fn remove_favorite(
        &self,
        username: &str,
        movie_id: Uuid,
    ) -> DbResult<Option<UserRecord>> {
        let Some(row) = self.find_row(username).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND movie_id = $2")
            .bind(row.id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(Some(self.load_record(row).await?))
    }

    async fn delete(&self, username: &str) -> DbResult<bool> {
        // user_favorites rows go with the user via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
