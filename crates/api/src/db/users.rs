//! User repository.

use async_trait::async_trait;

use flexilearn_core::{Email, UserId};

use super::{PgStore, RepositoryError, insert_error};
use crate::models::{NewUser, UserRecord};

/// Storage operations on `users`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user row by email, password included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_user_by_email(&self, email: &Email)
    -> Result<Option<UserRecord>, RepositoryError>;

    /// Insert a user and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert_user(&self, user: &NewUser) -> Result<UserId, RepositoryError>;
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        sqlx::query_scalar::<_, UserId>(
            r"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(self.pool())
        .await
        .map_err(|e| insert_error(e, "user email"))
    }
}
