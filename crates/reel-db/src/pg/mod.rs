//! PostgreSQL repository implementations

mod catalog;
mod user;

pub use catalog::PgCatalogRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub catalog: PgCatalogRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            catalog: PgCatalogRepository::new(pool),
        }
    }
}
