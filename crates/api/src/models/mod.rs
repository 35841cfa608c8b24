//! Domain models for the four persisted entities.
//!
//! `New*` types carry validated input on its way into storage; the other
//! types are rows read back out.

pub mod contact;
pub mod seller;
pub mod subscriber;
pub mod user;

pub use contact::NewContactMessage;
pub use seller::NewSeller;
pub use subscriber::Subscriber;
pub use user::{NewUser, User, UserRecord};
