//! Password hashing
//!
//! Salted adaptive hashing via bcrypt. The per-call salt is embedded in the
//! output string, so no separate salt storage exists anywhere.

use crate::AuthError;

/// Password hasher with a fixed work factor.
///
/// The default cost lands in the tens of milliseconds per call on commodity
/// hardware. Stateless and freely shareable across concurrent requests.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Default bcrypt work factor
    pub const DEFAULT_COST: u32 = 10;

    /// Create a hasher with the given work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// Each call generates a fresh salt, so hashing the same password twice
    /// yields different outputs.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            // The error never carries the plaintext
            tracing::error!("Password hashing failed: {}", e);
            AuthError::Internal("password hashing failed".to_string())
        })
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns false on mismatch and on malformed stored hashes; never
    /// panics, never propagates an error for an expected condition.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}
