//! Account service - ties credential hashing and token issuance to the user
//! repository.
//!
//! Handlers talk to this service for registration, login, and profile
//! updates; catalog and favorites access goes straight to the repositories.

use std::sync::Arc;

use chrono::NaiveDate;
use reel_db::{NewUser, UpdateUser, UserRecord, UserRepository};
use uuid::Uuid;

use crate::{AuthConfig, AuthError, PasswordHasher, TokenClaims, TokenService};

/// Registration input (plaintext password; hashed before it reaches storage)
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Wholesale profile replacement input.
///
/// Every field is resubmitted; an absent birthday clears the stored value.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Account service
pub struct AccountService<U: UserRepository> {
    users: Arc<U>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl<U: UserRepository> AccountService<U> {
    /// Create a new account service
    pub fn new(config: &AuthConfig, users: Arc<U>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(config.bcrypt_cost),
            tokens: TokenService::new(config),
        }
    }

    /// Register a new user.
    ///
    /// Input format rules are checked first; the username uniqueness check
    /// is the store's own constraint, so concurrent identical registrations
    /// cannot both succeed.
    pub async fn register(&self, input: Registration) -> Result<UserRecord, AuthError> {
        validate_account_input(&input.username, &input.password, &input.email)?;

        let password_hash = self.hasher.hash(&input.password)?;
        let new_user = NewUser {
            id: Uuid::new_v4(),
            username: input.username.clone(),
            password_hash,
            email: input.email,
            birthday: input.birthday,
        };

        self.users.create(new_user).await.map_err(|e| match e {
            reel_db::DbError::UniqueViolation => AuthError::DuplicateUsername(input.username),
            other => other.into(),
        })
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<(UserRecord, String), AuthError> {
        let record = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &record.user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(record.user.id, &record.user.username)?;
        Ok((record, token))
    }

    /// Verify a presented token and return the principal's claims
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.tokens.verify(token)
    }

    /// Replace a user's profile fields wholesale, rehashing the password.
    ///
    /// Returns `UserNotFound` when no such username exists, and
    /// `DuplicateUsername` when the replacement username is already taken.
    pub async fn update_profile(
        &self,
        username: &str,
        input: ProfileUpdate,
    ) -> Result<UserRecord, AuthError> {
        validate_account_input(&input.username, &input.password, &input.email)?;

        let password_hash = self.hasher.hash(&input.password)?;
        let fields = UpdateUser {
            username: input.username.clone(),
            password_hash,
            email: input.email,
            birthday: input.birthday,
        };

        self.users
            .update(username, fields)
            .await
            .map_err(|e| match e {
                reel_db::DbError::UniqueViolation => AuthError::DuplicateUsername(input.username),
                other => other.into(),
            })?
            .ok_or(AuthError::UserNotFound)
    }
}

impl<U: UserRepository> std::fmt::Debug for AccountService<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

/// Minimum password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate registration and profile-update input.
///
/// Collects every violation so the caller sees the full list at once.
fn validate_account_input(username: &str, password: &str, email: &str) -> Result<(), AuthError> {
    let mut errors = Vec::new();

    if username.is_empty() {
        errors.push("Username is required".to_string());
    } else if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push("Username contains non alphanumeric characters - not allowed".to_string());
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "Password is required to have a minimum length of {MIN_PASSWORD_LENGTH} characters"
        ));
    }

    if !is_valid_email(email) {
        errors.push("Email does not appear to be a valid format".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(errors))
    }
}

/// Minimal well-formedness check: one '@', non-empty local part, and a
/// dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_account_input("abc12345", "longenough1", "a@b.com").is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = validate_account_input("", "longenough1", "a@b.com").unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref msgs) if msgs.len() == 1));
    }

    #[test]
    fn test_non_alphanumeric_username_rejected() {
        assert!(validate_account_input("abc 123", "longenough1", "a@b.com").is_err());
        assert!(validate_account_input("abc-123", "longenough1", "a@b.com").is_err());
        assert!(validate_account_input("abc@123", "longenough1", "a@b.com").is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validate_account_input("abc12345", "short", "a@b.com").unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn test_bad_email_rejected() {
        assert!(validate_account_input("abc12345", "longenough1", "nope").is_err());
        assert!(validate_account_input("abc12345", "longenough1", "@b.com").is_err());
        assert!(validate_account_input("abc12345", "longenough1", "a@b").is_err());
        assert!(validate_account_input("abc12345", "longenough1", "a@.com").is_err());
        assert!(validate_account_input("abc12345", "longenough1", "a b@c.com").is_err());
    }

    #[test]
    fn test_all_violations_collected() {
        let err = validate_account_input("", "x", "bad").unwrap_err();
        match err {
            AuthError::Validation(msgs) => assert_eq!(msgs.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
