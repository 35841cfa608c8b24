//! Newsletter subscriber repository.

use async_trait::async_trait;

use flexilearn_core::{Email, SubscriberId};

use super::{PgStore, RepositoryError, insert_error};
use crate::models::Subscriber;

/// Storage operations on `subscribers`.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Get a subscriber by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_subscriber_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscriber>, RepositoryError>;

    /// Insert a subscriber and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already subscribed.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert_subscriber(&self, email: &Email) -> Result<SubscriberId, RepositoryError>;
}

#[async_trait]
impl SubscriberStore for PgStore {
    async fn find_subscriber_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscriber>, RepositoryError> {
        let row = sqlx::query_as::<_, Subscriber>(
            "SELECT id, email FROM subscribers WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn insert_subscriber(&self, email: &Email) -> Result<SubscriberId, RepositoryError> {
        sqlx::query_scalar::<_, SubscriberId>(
            "INSERT INTO subscribers (email) VALUES ($1) RETURNING id",
        )
        .bind(email)
        .fetch_one(self.pool())
        .await
        .map_err(|e| insert_error(e, "subscriber email"))
    }
}
