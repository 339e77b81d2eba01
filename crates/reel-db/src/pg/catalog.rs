//! PostgreSQL catalog repository implementation
//!
//! All reads; movies are returned with their genre, director, and actor
//! references expanded inline.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{ActorRow, DirectorRow, GenreRow, MovieActorRow, MovieJoinRow, MovieRecord};
use crate::repo::CatalogRepository;

const MOVIE_SELECT: &str = r#"
    SELECT m.id, m.title, m.description, m.image_path, m.featured,
           g.id AS genre_id, g.name AS genre_name, g.description AS genre_description,
           d.id AS director_id, d.name AS director_name, d.bio AS director_bio,
           d.birth AS director_birth, d.death AS director_death
    FROM movies m
    LEFT JOIN genres g ON g.id = m.genre_id
    LEFT JOIN directors d ON d.id = m.director_id
"#;

/// PostgreSQL catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    /// Create a new catalog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the ordered actor lists for a set of movies in one query.
    async fn actors_for_movies(&self, movie_ids: &[Uuid]) -> DbResult<HashMap<Uuid, Vec<ActorRow>>> {
        let rows = sqlx::query_as::<_, MovieActorRow>(
            r#"
            SELECT ma.movie_id, a.id, a.name, a.bio, a.birth, a.death
            FROM movie_actors ma
            JOIN actors a ON a.id = ma.actor_id
            WHERE ma.movie_id = ANY($1)
            ORDER BY ma.movie_id, ma.ordinal
            "#,
        )
        .bind(movie_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_movie: HashMap<Uuid, Vec<ActorRow>> = HashMap::new();
        for row in rows {
            by_movie.entry(row.movie_id).or_default().push(row.into());
        }
        Ok(by_movie)
    }

    async fn expand(&self, rows: Vec<MovieJoinRow>) -> DbResult<Vec<MovieRecord>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut actors = self.actors_for_movies(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let cast = actors.remove(&row.id).unwrap_or_default();
                row.into_record(cast)
            })
            .collect())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_movies(&self) -> DbResult<Vec<MovieRecord>> {
        let rows = sqlx::query_as::<_, MovieJoinRow>(&format!("{MOVIE_SELECT} ORDER BY m.title"))
            .fetch_all(&self.pool)
            .await?;

        self.expand(rows).await
    }

    async fn find_movie_by_title(&self, title: &str) -> DbResult<Option<MovieRecord>> {
        let row = sqlx::query_as::<_, MovieJoinRow>(&format!(
            "{MOVIE_SELECT} WHERE m.title = $1 LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.expand(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_genres(&self) -> DbResult<Vec<GenreRow>> {
        let genres =
            sqlx::query_as::<_, GenreRow>("SELECT id, name, description FROM genres ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(genres)
    }

    async fn find_genre_by_name(&self, name: &str) -> DbResult<Option<GenreRow>> {
        let genre = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, description FROM genres WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(genre)
    }

    async fn list_directors(&self) -> DbResult<Vec<DirectorRow>> {
        let directors = sqlx::query_as::<_, DirectorRow>(
            "SELECT id, name, bio, birth, death FROM directors ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(directors)
    }

    async fn find_director_by_name(&self, name: &str) -> DbResult<Option<DirectorRow>> {
        let director = sqlx::query_as::<_, DirectorRow>(
            "SELECT id, name, bio, birth, death FROM directors WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(director)
    }

    async fn list_actors(&self) -> DbResult<Vec<ActorRow>> {
        let actors = sqlx::query_as::<_, ActorRow>(
            "SELECT id, name, bio, birth, death FROM actors ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(actors)
    }

    async fn find_actor_by_name(&self, name: &str) -> DbResult<Option<ActorRow>> {
        let actor = sqlx::query_as::<_, ActorRow>(
            "SELECT id, name, bio, birth, death FROM actors WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(actor)
    }
}
