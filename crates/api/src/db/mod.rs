//! Storage access for the API.
//!
//! # Database: `flexilearn`
//!
//! The schema is provisioned outside this service. Expected tables:
//!
//! - `users` - `id SERIAL`, `name`, `email UNIQUE`, `password`
//! - `sellers` - `id SERIAL`, `first_name`, `last_name`, `email`, `phone`,
//!   `company_name`, `business_type`, `seller_category`, `selected_plan NULL`,
//!   `website NULL`, `terms_agreed BOOLEAN`
//! - `contact_messages` - `id SERIAL`, `full_name`, `email`, `phone NULL`,
//!   `subject NULL`, `message`
//! - `subscribers` - `id SERIAL`, `email UNIQUE`
//!
//! # Uniqueness
//!
//! Handlers read before they write, but the read is not atomic with the
//! insert. A unique violation on insert is reported as
//! [`RepositoryError::Conflict`], which callers treat exactly like a hit on
//! the preceding read.
//!
//! # Implementations
//!
//! - [`PgStore`] - `PostgreSQL` via a shared `sqlx` pool
//! - [`MemoryStore`] - in-process tables for tests and local development

pub mod contact;
pub mod memory;
pub mod sellers;
pub mod subscribers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::PoolConfig;

pub use contact::ContactStore;
pub use memory::MemoryStore;
pub use sellers::SellerStore;
pub use subscribers::SubscriberStore;
pub use users::UserStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Everything the route handlers need from storage.
pub trait Store: UserStore + SellerStore + ContactStore + SubscriberStore {}

impl<T> Store for T where T: UserStore + SellerStore + ContactStore + SubscriberStore {}

/// `PostgreSQL`-backed store.
///
/// Cheap to clone; the pool is reference counted.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// The pool connects lazily so the server can start while the database is
/// still coming up; use [`check_connection`] to probe it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(
    database_url: &secrecy::SecretString,
    config: &PoolConfig,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(0)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Duration::from_secs(600))
        .connect_lazy(database_url.expose_secret())
}

/// Borrow a connection and run a trivial query.
///
/// # Errors
///
/// Returns `sqlx::Error` if no connection can be acquired or the query fails.
pub async fn check_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Classify an insert failure, turning unique violations into `Conflict`.
fn insert_error(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_error_passes_through_non_database_errors() {
        let err = insert_error(sqlx::Error::PoolTimedOut, "user email");
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Conflict("user email already exists".to_string());
        assert_eq!(
            err.to_string(),
            "constraint violation: user email already exists"
        );
    }
}
