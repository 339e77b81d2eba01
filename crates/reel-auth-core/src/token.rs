//! Token issuance and verification
//!
//! Self-contained HS256 JWTs binding a token to a user identity. Tokens are
//! opaque to clients beyond their encoded claims; the signing secret lives in
//! process-wide configuration and there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthConfig, AuthError};

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the username
    pub sub: String,
    /// User identifier
    pub uid: Uuid,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Token service: issue and verify signed, time-bounded tokens.
///
/// Pure and stateless; safe to call from any number of concurrent requests.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a token service from validated configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    /// Issue a signed token for the given principal
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: username.to_string(),
            uid: user_id,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Token signing failed: {}", e);
            AuthError::Internal("token signing failed".to_string())
        })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// Fails with `TokenExpired` past expiry and `InvalidToken` for bad
    /// signatures, wrong algorithms, and malformed structure. Never mutates
    /// state.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-long-enough-for-hs256-use";

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new(SECRET).unwrap())
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let token = svc.issue(user_id, "abc12345").unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, "abc12345");
        assert_eq!(claims.uid, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), "abc12345").unwrap();

        // Flip the last character of the signature
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'a' { 'b' } else { 'a' });

        assert!(matches!(svc.verify(&tampered), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_truncated_token_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), "abc12345").unwrap();

        // Drop the signature segment entirely
        let truncated: String = token.rsplitn(2, '.').nth(1).unwrap().to_string();
        assert!(matches!(
            svc.verify(&truncated),
            Err(AuthError::InvalidToken)
        ));

        // Garbage is not a token either
        assert!(matches!(
            svc.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = service();
        let verifier =
            TokenService::new(&AuthConfig::new("another-secret-also-long-enough!!").unwrap());

        let token = signer.issue(Uuid::new_v4(), "abc12345").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "abc12345".to_string(),
            uid: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(svc.verify(&token), Err(AuthError::TokenExpired)));
    }
}
