//! User domain types.

use serde::Serialize;
use sqlx::FromRow;

use flexilearn_core::{Email, UserId};

/// A user as exposed over HTTP.
///
/// Deliberately has no password field; this is what the login response
/// returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
}

/// A full `users` row, including the stored password value.
///
/// `password` is either an Argon2id PHC string or a legacy plaintext value.
/// It never leaves the auth service.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: String,
}

impl UserRecord {
    /// The public part of the row.
    #[must_use]
    pub fn profile(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// A user about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    /// Value for the `password` column, already in its stored form.
    pub password: String,
}
