//! Newsletter subscriber.

use sqlx::FromRow;

use flexilearn_core::{Email, SubscriberId};

/// A `subscribers` row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
}
