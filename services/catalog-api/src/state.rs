//! Application state

use std::sync::Arc;

use reel_auth_core::AccountService;
use reel_db::pg::{PgUserRepository, Repositories};
use reel_db::DbPool;

use crate::config::Config;

/// Type alias for the account service with the concrete repository type
pub type AccountServiceImpl = AccountService<PgUserRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Account service for registration, login, and token verification
    pub accounts: Arc<AccountServiceImpl>,
    /// Database repositories
    pub repos: Repositories,
    /// Database connection pool (shared reference for health checks)
    pub pool: DbPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(repos: Repositories, pool: DbPool, config: Config) -> Self {
        let accounts = AccountService::new(&config.auth, Arc::new(repos.users.clone()));
        Self {
            accounts: Arc::new(accounts),
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
