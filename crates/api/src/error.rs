//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. The `IntoResponse` impl is the
//! single place that decides status codes and client-facing messages:
//!
//! | Kind | Status | Logged |
//! |---|---|---|
//! | validation | 400 | debug |
//! | duplicate email | 400 | info |
//! | bad credentials | 401 | info |
//! | storage fault | 500 | error + Sentry |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use flexilearn_core::EmailError;

use crate::db::RepositoryError;
use crate::routes::MessageResponse;
use crate::services::auth::AuthError;

/// Generic 500 message.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
/// 400 message for a structurally invalid email.
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
/// 400 message for a body that is not the expected JSON object.
pub const INVALID_BODY: &str = "Invalid request body.";
/// 401 message for both unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
/// 400 message for a duplicate signup.
pub const USER_EXISTS: &str = "User already exists.";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid input. Carries the client-facing message.
    #[error("Validation failed: {0}")]
    Validation(&'static str),

    /// Submitted email is not a structurally valid address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Request body could not be decoded.
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// Business-rule conflict (duplicate email). Carries the client-facing message.
    #[error("Conflict: {0}")]
    Conflict(&'static str),

    /// Signup or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Inserting a subscriber failed; reported with its own message.
    #[error("Subscription insert failed: {0}")]
    SubscriptionFailed(RepositoryError),
}

impl AppError {
    /// Whether this error is a server fault rather than a client mistake.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::SubscriptionFailed(_)
                | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
        )
    }

    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(message) | Self::Conflict(message) => (StatusCode::BAD_REQUEST, *message),
            Self::InvalidEmail(_) => (StatusCode::BAD_REQUEST, INVALID_EMAIL),
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, INVALID_BODY),
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => (StatusCode::BAD_REQUEST, INVALID_EMAIL),
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS),
                AuthError::UserAlreadyExists => (StatusCode::BAD_REQUEST, USER_EXISTS),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
                }
            },
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR),
            Self::SubscriptionFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Subscription failed.")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if matches!(
            self,
            Self::Conflict(_)
                | Self::Auth(AuthError::UserAlreadyExists | AuthError::InvalidCredentials)
        ) {
            tracing::info!(error = %self, "Request rejected");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        // Internal error details never reach the client
        (status, MessageResponse::new(message)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
