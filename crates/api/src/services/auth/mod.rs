//! Authentication service.
//!
//! Signup and login against `users`. New passwords are written according to
//! the configured [`PasswordStorage`]; login verifies either stored form.

mod error;
pub mod legacy;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use flexilearn_core::{Email, UserId};

use crate::config::PasswordStorage;
use crate::db::{RepositoryError, UserStore};
use crate::models::{NewUser, User};

/// Authentication service.
///
/// Generic over the store so handlers can hand in their `dyn Store` directly.
pub struct AuthService<'a, S: UserStore + ?Sized> {
    users: &'a S,
    password_storage: PasswordStorage,
}

impl<'a, S: UserStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a S, password_storage: PasswordStorage) -> Self {
        Self {
            users,
            password_storage,
        }
    }

    /// Register a new user.
    ///
    /// Checks for an existing row first, then inserts. A unique violation on
    /// the insert (a concurrent signup won the race) is reported the same way
    /// as a hit on the check.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    /// Returns `AuthError::Repository` or `AuthError::PasswordHash` on internal failure.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        let email = Email::parse(email)?;

        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let stored_password = match self.password_storage {
            PasswordStorage::Argon2 => hash_password(password)?,
            PasswordStorage::LegacyPlaintext => legacy::encode(password),
        };

        let new_user = NewUser {
            name: name.to_owned(),
            email,
            password: stored_password,
        };

        self.users
            .insert_user(&new_user)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown (or
    /// cannot be an address at all) or the password does not match.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let record = self
            .users
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &record.password)?;

        Ok(record.profile())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored value of either form.
fn verify_password(password: &str, stored: &str) -> Result<(), AuthError> {
    let Some(parsed_hash) = legacy::parse_hash(stored) else {
        return if legacy::matches(password, stored) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        };
    };

    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_legacy_plaintext() {
        assert!(verify_password("p", "p").is_ok());
        assert!(matches!(
            verify_password("wrong", "p"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_plaintext_that_looks_like_a_hash() {
        assert!(verify_password("$argon2rocks", "$argon2rocks").is_ok());
        assert!(verify_password("$argon2id$garbage", "$argon2id$garbage").is_ok());
        assert!(matches!(
            verify_password("$argon2", "$argon2rocks"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_malformed_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("p", "$argon2id$garbage"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_hashes_by_default() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, PasswordStorage::Argon2);

        auth.register("A", "a@x.com", "p").await.unwrap();

        let rows = store.users();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].email.as_str(), "a@x.com");
        assert_ne!(rows[0].password, "p");
        assert!(auth.login("a@x.com", "p").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_plaintext_policy_stores_verbatim() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, PasswordStorage::LegacyPlaintext);

        auth.register("A", "a@x.com", "p").await.unwrap();

        assert_eq!(store.users()[0].password, "p");
    }

    #[tokio::test]
    async fn test_plaintext_policy_round_trips_dollar_prefixed_password() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, PasswordStorage::LegacyPlaintext);

        auth.register("A", "a@x.com", "$argon2rocks").await.unwrap();

        assert_eq!(store.users()[0].password, "$argon2rocks");
        assert!(auth.login("a@x.com", "$argon2rocks").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, PasswordStorage::LegacyPlaintext);

        auth.register("A", "a@x.com", "p").await.unwrap();
        let err = auth.register("B", "a@x.com", "q").await.unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, PasswordStorage::LegacyPlaintext);

        let err = auth.register("A", "not-an-email", "p").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidEmail(_)));
        assert!(store.users().is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, PasswordStorage::LegacyPlaintext);
        auth.register("A", "a@x.com", "p").await.unwrap();

        assert!(matches!(
            auth.login("a@x.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody@x.com", "p").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("not-an-email", "p").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_accepts_seeded_legacy_row_under_argon2_policy() {
        let store = MemoryStore::new();
        let email = Email::parse("old@x.com").unwrap();
        store.seed_user("Old Timer", &email, "hunter2").unwrap();
        let auth = AuthService::new(&store, PasswordStorage::Argon2);

        let user = auth.login("old@x.com", "hunter2").await.unwrap();

        assert_eq!(user.name, "Old Timer");
        assert_eq!(user.email, email);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_repository_error() {
        let store = MemoryStore::new();
        store.fail_lookups(true);
        let auth = AuthService::new(&store, PasswordStorage::LegacyPlaintext);

        assert!(matches!(
            auth.register("A", "a@x.com", "p").await,
            Err(AuthError::Repository(_))
        ));
        assert!(matches!(
            auth.login("a@x.com", "p").await,
            Err(AuthError::Repository(_))
        ));
    }
}
