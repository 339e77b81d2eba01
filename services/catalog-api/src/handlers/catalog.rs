//! Catalog handlers (movies, genres, directors, actors)
//!
//! All read-only and all behind authentication. Lookups return a JSON null
//! body when nothing matches, per the original wire contract. The only
//! failure mode beyond auth is store connectivity, surfaced as 500.

use axum::extract::{Path, State};
use axum::Json;

use reel_db::{ActorRow, CatalogRepository, DirectorRow, GenreRow, MovieRecord};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /movies
pub async fn list_movies(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<MovieRecord>>> {
    let movies = state.repos.catalog.list_movies().await?;
    Ok(Json(movies))
}

/// GET /movies/{Title}
///
/// First match when titles collide; titles carry no uniqueness guarantee.
pub async fn get_movie(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(title): Path<String>,
) -> ApiResult<Json<Option<MovieRecord>>> {
    let movie = state.repos.catalog.find_movie_by_title(&title).await?;
    Ok(Json(movie))
}

/// GET /genres
pub async fn list_genres(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<GenreRow>>> {
    let genres = state.repos.catalog.list_genres().await?;
    Ok(Json(genres))
}

/// GET /genres/{Name}
pub async fn get_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Option<GenreRow>>> {
    let genre = state.repos.catalog.find_genre_by_name(&name).await?;
    Ok(Json(genre))
}

/// GET /directors
pub async fn list_directors(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<DirectorRow>>> {
    let directors = state.repos.catalog.list_directors().await?;
    Ok(Json(directors))
}

/// GET /directors/{Name}
pub async fn get_director(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Option<DirectorRow>>> {
    let director = state.repos.catalog.find_director_by_name(&name).await?;
    Ok(Json(director))
}

/// GET /actors
pub async fn list_actors(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<ActorRow>>> {
    let actors = state.repos.catalog.list_actors().await?;
    Ok(Json(actors))
}

/// GET /actors/{Name}
pub async fn get_actor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Option<ActorRow>>> {
    let actor = state.repos.catalog.find_actor_by_name(&name).await?;
    Ok(Json(actor))
}
