//! Contact message log.

use async_trait::async_trait;

use flexilearn_core::ContactMessageId;

use super::{PgStore, RepositoryError};
use crate::models::NewContactMessage;

/// Append-only storage for `contact_messages`.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Append a contact message and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    async fn insert_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessageId, RepositoryError>;
}

#[async_trait]
impl ContactStore for PgStore {
    async fn insert_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessageId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ContactMessageId>(
            r"
            INSERT INTO contact_messages (full_name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&message.full_name)
        .bind(&message.email)
        .bind(message.phone.as_deref())
        .bind(message.subject.as_deref())
        .bind(&message.message)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }
}
