//! FlexiLearn Core - Shared domain types.
//!
//! Types used by the API crate and its tests:
//! - [`Email`] - validated email address
//! - Entity IDs ([`UserId`], [`SellerId`], [`ContactMessageId`], [`SubscriberId`])
//!
//! The crate performs no I/O. `sqlx` encode/decode support for Postgres is
//! available behind the `postgres` feature.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
