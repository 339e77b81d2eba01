//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! `MovieRecord` and `UserRecord` are assembled from more than one query and
//! carry their relational expansion inline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row together with its favorite-movie identifiers.
///
/// Favorites are identifiers, never embedded movie documents; an identifier
/// may dangle if catalog data was removed out of band.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: UserRow,
    pub favorites: Vec<Uuid>,
}

/// Genre row from the database
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct GenreRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Director row from the database
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct DirectorRow {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub birth: String,
    pub death: Option<String>,
}

/// Actor row from the database
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct ActorRow {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub birth: String,
    pub death: Option<String>,
}

/// A movie with its genre, director, and actors expanded inline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Option<GenreRow>,
    pub director: Option<DirectorRow>,
    pub actors: Vec<ActorRow>,
    pub image_path: Option<String>,
    pub featured: Option<bool>,
}

/// Flat movie row as returned by the joined catalog query.
///
/// Genre and director columns are nullable because the references themselves
/// are optional in the schema.
#[derive(Debug, Clone, FromRow)]
pub struct MovieJoinRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub featured: Option<bool>,
    pub genre_id: Option<Uuid>,
    pub genre_name: Option<String>,
    pub genre_description: Option<String>,
    pub director_id: Option<Uuid>,
    pub director_name: Option<String>,
    pub director_bio: Option<String>,
    pub director_birth: Option<String>,
    pub director_death: Option<String>,
}

impl MovieJoinRow {
    /// Assemble the expanded record, attaching the actors fetched separately.
    pub fn into_record(self, actors: Vec<ActorRow>) -> MovieRecord {
        let genre = match (self.genre_id, self.genre_name, self.genre_description) {
            (Some(id), Some(name), Some(description)) => Some(GenreRow {
                id,
                name,
                description,
            }),
            _ => None,
        };
        let director = match (
            self.director_id,
            self.director_name,
            self.director_bio,
            self.director_birth,
        ) {
            (Some(id), Some(name), Some(bio), Some(birth)) => Some(DirectorRow {
                id,
                name,
                bio,
                birth,
                death: self.director_death,
            }),
            _ => None,
        };

        MovieRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            genre,
            director,
            actors,
            image_path: self.image_path,
            featured: self.featured,
        }
    }
}

/// Actor row joined through `movie_actors`, keyed by movie.
#[derive(Debug, Clone, FromRow)]
pub struct MovieActorRow {
    pub movie_id: Uuid,
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub birth: String,
    pub death: Option<String>,
}

impl From<MovieActorRow> for ActorRow {
    fn from(row: MovieActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            bio: row.bio,
            birth: row.birth,
            death: row.death,
        }
    }
}
