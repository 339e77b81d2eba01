//! Account service integration tests against the in-memory repository

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use reel_auth_core::{AccountService, AuthConfig, AuthError, ProfileUpdate, Registration};
use reel_db::UserRepository;
use uuid::Uuid;

use common::mock_repos::MockUserRepository;

const SECRET: &str = "integration-test-secret-0123456789ab";

fn service() -> (AccountService<MockUserRepository>, Arc<MockUserRepository>) {
    let repo = Arc::new(MockUserRepository::new());
    // Low bcrypt cost keeps the suite fast
    let config = AuthConfig::new(SECRET).unwrap().with_bcrypt_cost(4);
    (AccountService::new(&config, Arc::clone(&repo)), repo)
}

fn registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        password: "longenough1".to_string(),
        email: "a@b.com".to_string(),
        birthday: None,
    }
}

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    let (svc, _) = service();

    let record = svc.register(registration("abc12345")).await.unwrap();
    assert_eq!(record.user.username, "abc12345");
    assert_ne!(record.user.password_hash, "longenough1");
    assert!(record.user.password_hash.starts_with("$2"));
    assert!(record.favorites.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username_fails() {
    let (svc, _) = service();

    svc.register(registration("abc12345")).await.unwrap();
    let err = svc.register(registration("abc12345")).await.unwrap_err();
    assert!(matches!(err, AuthError::DuplicateUsername(name) if name == "abc12345"));
}

#[tokio::test]
async fn test_register_invalid_input_fails() {
    let (svc, _) = service();

    let mut bad = registration("abc 123");
    bad.password = "short".to_string();
    let err = svc.register(bad).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn test_login_roundtrip() {
    let (svc, _) = service();
    let created = svc.register(registration("abc12345")).await.unwrap();

    let (record, token) = svc.login("abc12345", "longenough1").await.unwrap();
    assert_eq!(record.user.id, created.user.id);

    let claims = svc.verify_token(&token).unwrap();
    assert_eq!(claims.sub, "abc12345");
    assert_eq!(claims.uid, created.user.id);
}

#[tokio::test]
async fn test_login_wrong_password_uniform_failure() {
    let (svc, _) = service();
    svc.register(registration("abc12345")).await.unwrap();

    let wrong = svc.login("abc12345", "wrongpassword").await.unwrap_err();
    let unknown = svc.login("nosuchuser", "longenough1").await.unwrap_err();

    // Unknown user and wrong password are the same failure to the caller
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_update_replaces_wholesale_and_clears_birthday() {
    let (svc, repo) = service();
    let mut reg = registration("abc12345");
    reg.birthday = NaiveDate::from_ymd_opt(1990, 5, 17);
    svc.register(reg).await.unwrap();

    // Resubmitting without a birthday clears it
    let updated = svc
        .update_profile(
            "abc12345",
            ProfileUpdate {
                username: "abc12345".to_string(),
                password: "anotherlongpw".to_string(),
                email: "new@b.com".to_string(),
                birthday: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.user.email, "new@b.com");
    assert!(updated.user.birthday.is_none());

    // The password was rehashed: old credential no longer works
    assert!(svc.login("abc12345", "longenough1").await.is_err());
    assert!(svc.login("abc12345", "anotherlongpw").await.is_ok());

    let stored = repo.find_by_username("abc12345").await.unwrap().unwrap();
    assert_ne!(stored.user.password_hash, "anotherlongpw");
}

#[tokio::test]
async fn test_update_unknown_user_fails() {
    let (svc, _) = service();
    let err = svc
        .update_profile(
            "ghost",
            ProfileUpdate {
                username: "ghost".to_string(),
                password: "longenough1".to_string(),
                email: "a@b.com".to_string(),
                birthday: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn test_update_to_taken_username_fails() {
    let (svc, _) = service();
    svc.register(registration("first111")).await.unwrap();
    svc.register(registration("second22")).await.unwrap();

    let err = svc
        .update_profile(
            "second22",
            ProfileUpdate {
                username: "first111".to_string(),
                password: "longenough1".to_string(),
                email: "a@b.com".to_string(),
                birthday: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateUsername(_)));
}

#[tokio::test]
async fn test_favorites_add_is_idempotent() {
    let (svc, repo) = service();
    svc.register(registration("abc12345")).await.unwrap();
    let movie = Uuid::new_v4();

    repo.add_favorite("abc12345", movie).await.unwrap().unwrap();
    let record = repo.add_favorite("abc12345", movie).await.unwrap().unwrap();

    // Set semantics: a second add does not append a second entry
    assert_eq!(record.favorites, vec![movie]);
}

#[tokio::test]
async fn test_favorites_remove_leaves_zero() {
    let (svc, repo) = service();
    svc.register(registration("abc12345")).await.unwrap();
    let movie = Uuid::new_v4();
    let other = Uuid::new_v4();

    repo.add_favorite("abc12345", movie).await.unwrap();
    repo.add_favorite("abc12345", movie).await.unwrap();
    repo.add_favorite("abc12345", other).await.unwrap();

    let record = repo
        .remove_favorite("abc12345", movie)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.favorites, vec![other]);
}

#[tokio::test]
async fn test_favorites_unknown_user() {
    let (_, repo) = service();
    let result = repo.add_favorite("ghost", Uuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_end_to_end_register_login_delete() {
    let (svc, repo) = service();

    // Register
    let created = svc.register(registration("abc12345")).await.unwrap();
    assert!(created.user.password_hash.starts_with("$2"));

    // Login issues a token that resolves back to the same user
    let (_, token) = svc.login("abc12345", "longenough1").await.unwrap();
    let claims = svc.verify_token(&token).unwrap();
    let fetched = repo.find_by_username(&claims.sub).await.unwrap().unwrap();
    assert_eq!(fetched.user.id, created.user.id);

    // Deregister, then the lookup comes back empty
    assert!(repo.delete("abc12345").await.unwrap());
    assert!(repo.find_by_username("abc12345").await.unwrap().is_none());
    assert!(!repo.delete("abc12345").await.unwrap());
}
