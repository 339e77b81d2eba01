//! Reel DB - Database abstractions
//!
//! SQLx-based storage layer for the movie catalog and user accounts.
//!
//! # Example
//!
//! ```rust,ignore
//! use reel_db::{create_pool, Repositories, UserRepository};
//!
//! let pool = create_pool("postgres://localhost/reel").await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.find_by_username("abc12345").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
