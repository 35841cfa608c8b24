//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Accounts
//! POST /api/signup             - Register a user
//! POST /api/login              - Check credentials, return the user
//!
//! # Sellers
//! POST /api/seller/register    - Submit a seller application
//!
//! # Outreach
//! POST /api/contact            - Record a contact form message
//! POST /api/subscribe          - Add an email to the subscriber list
//! ```
//!
//! Every body is JSON. Failures and plain acknowledgements are
//! `{"message": "..."}`.

pub mod auth;
pub mod contact;
pub mod extract;
pub mod newsletter;
pub mod seller;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub use extract::ApiJson;

/// Body of every acknowledgement and error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Wrap a client-facing message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .route("/api/seller/register", post(seller::register))
        .route("/api/contact", post(contact::submit))
        .route("/api/subscribe", post(newsletter::subscribe))
}

/// A submitted string field, or `None` if it is absent, `null` or blank.
///
/// The returned value is the submitted input, untrimmed.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("A")), Some("A"));
        assert_eq!(non_blank(Some(" A ")), Some(" A "));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_message_response_serializes_as_object() {
        let body = serde_json::to_value(MessageResponse::new("Subscription successful!")).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Subscription successful!"}));
    }
}
