//! Configuration types for the auth core

use std::time::Duration;

use crate::AuthError;

/// Auth configuration
///
/// Constructed once at startup and injected; there is no ambient global
/// secret. Rotating the secret invalidates every outstanding token.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing
    pub jwt_secret: String,
    /// How long issued tokens stay valid
    pub token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Default token lifetime: 7 days
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    /// Create a new auth config.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes.
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, AuthError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "JWT secret too short: got {} bytes, need at least {}",
                jwt_secret.len(),
                Self::MIN_SECRET_LENGTH
            )));
        }
        Ok(Self {
            jwt_secret,
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            bcrypt_cost: crate::password::PasswordHasher::DEFAULT_COST,
        })
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set bcrypt work factor
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
