//! In-memory store.
//!
//! Mirrors the Postgres schema closely enough for handler tests: `users.email`
//! and `subscribers.email` are unique, `sellers` and `contact_messages` are
//! not, unless [`MemoryStore::unique_seller_emails`] is switched on. Lookups
//! and inserts can be made to fail on demand to exercise the storage-fault
//! paths, and lookups can be made to miss existing rows to reproduce a read
//! that lost a race with a concurrent insert.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use flexilearn_core::{ContactMessageId, Email, SellerId, SubscriberId, UserId};

use super::{ContactStore, RepositoryError, SellerStore, SubscriberStore, UserStore};
use crate::models::{NewContactMessage, NewSeller, NewUser, Subscriber, UserRecord};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    sellers: Vec<(SellerId, NewSeller)>,
    contact_messages: Vec<(ContactMessageId, NewContactMessage)>,
    subscribers: Vec<Subscriber>,
    last_id: i32,
}

impl Tables {
    /// Shared sequence; IDs only need to be unique within a table.
    const fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// Store backed by in-process vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_lookups: AtomicBool,
    fail_inserts: AtomicBool,
    stale_reads: AtomicBool,
    unique_seller_emails: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with a pool timeout.
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a pool timeout.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read report "not found" while inserts still see
    /// the real rows.
    pub fn stale_reads(&self, stale: bool) {
        self.stale_reads.store(stale, Ordering::SeqCst);
    }

    /// Enforce a unique constraint on `sellers.email`.
    pub fn unique_seller_emails(&self, unique: bool) {
        self.unique_seller_emails.store(unique, Ordering::SeqCst);
    }

    /// Snapshot of `users`.
    #[must_use]
    pub fn users(&self) -> Vec<UserRecord> {
        self.lock().users.clone()
    }

    /// Snapshot of `sellers`.
    #[must_use]
    pub fn sellers(&self) -> Vec<(SellerId, NewSeller)> {
        self.lock().sellers.clone()
    }

    /// Snapshot of `contact_messages`.
    #[must_use]
    pub fn contact_messages(&self) -> Vec<(ContactMessageId, NewContactMessage)> {
        self.lock().contact_messages.clone()
    }

    /// Snapshot of `subscribers`.
    #[must_use]
    pub fn subscribers(&self) -> Vec<Subscriber> {
        self.lock().subscribers.clone()
    }

    /// Insert a user row directly, bypassing the auth service.
    ///
    /// Used to seed rows written by older deployments (e.g. plaintext
    /// passwords).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub fn seed_user(
        &self,
        name: &str,
        email: &Email,
        password: &str,
    ) -> Result<UserId, RepositoryError> {
        self.insert_user_row(&NewUser {
            name: name.to_string(),
            email: email.clone(),
            password: password.to_string(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_lookup(&self) -> Result<(), RepositoryError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn reads_are_stale(&self) -> bool {
        self.stale_reads.load(Ordering::SeqCst)
    }

    fn check_insert(&self) -> Result<(), RepositoryError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn insert_user_row(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|row| row.email == user.email) {
            return Err(RepositoryError::Conflict(
                "user email already exists".to_string(),
            ));
        }

        let id = UserId::new(tables.next_id());
        tables.users.push(UserRecord {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        });
        Ok(id)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        self.check_lookup()?;
        if self.reads_are_stale() {
            return Ok(None);
        }
        Ok(self
            .lock()
            .users
            .iter()
            .find(|row| &row.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        self.check_insert()?;
        self.insert_user_row(user)
    }
}

#[async_trait]
impl SellerStore for MemoryStore {
    async fn seller_email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        self.check_lookup()?;
        if self.reads_are_stale() {
            return Ok(false);
        }
        Ok(self
            .lock()
            .sellers
            .iter()
            .any(|(_, seller)| &seller.email == email))
    }

    async fn insert_seller(&self, seller: &NewSeller) -> Result<SellerId, RepositoryError> {
        self.check_insert()?;
        let mut tables = self.lock();
        if self.unique_seller_emails.load(Ordering::SeqCst)
            && tables.sellers.iter().any(|(_, row)| row.email == seller.email)
        {
            return Err(RepositoryError::Conflict(
                "seller email already exists".to_string(),
            ));
        }

        let id = SellerId::new(tables.next_id());
        tables.sellers.push((id, seller.clone()));
        Ok(id)
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessageId, RepositoryError> {
        self.check_insert()?;
        let mut tables = self.lock();
        let id = ContactMessageId::new(tables.next_id());
        tables.contact_messages.push((id, message.clone()));
        Ok(id)
    }
}

#[async_trait]
impl SubscriberStore for MemoryStore {
    async fn find_subscriber_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscriber>, RepositoryError> {
        self.check_lookup()?;
        if self.reads_are_stale() {
            return Ok(None);
        }
        Ok(self
            .lock()
            .subscribers
            .iter()
            .find(|row| &row.email == email)
            .cloned())
    }

    async fn insert_subscriber(&self, email: &Email) -> Result<SubscriberId, RepositoryError> {
        self.check_insert()?;
        let mut tables = self.lock();
        if tables.subscribers.iter().any(|row| &row.email == email) {
            return Err(RepositoryError::Conflict(
                "subscriber email already exists".to_string(),
            ));
        }

        let id = SubscriberId::new(tables.next_id());
        tables.subscribers.push(Subscriber {
            id,
            email: email.clone(),
        });
        Ok(id)
    }
}
