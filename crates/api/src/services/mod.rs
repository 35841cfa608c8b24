//! Business logic services.
//!
//! - `auth` - signup and login, including password storage policy

pub mod auth;
