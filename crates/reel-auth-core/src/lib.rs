//! Reel Auth Core - Identity and access-control business logic
//!
//! Password hashing, token issuance and verification, and the account
//! service that ties them to the user repository.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::PasswordHasher;
pub use service::{AccountService, ProfileUpdate, Registration};
pub use token::{TokenClaims, TokenService};
