//! HTTP handlers

pub mod auth;
pub mod catalog;
pub mod health;
pub mod users;

pub use auth::login;
pub use catalog::{
    get_actor, get_director, get_genre, get_movie, list_actors, list_directors, list_genres,
    list_movies,
};
pub use health::{health, ready, welcome};
pub use users::{
    add_favorite, delete_user, get_user, register, remove_favorite, update_user,
};
