//! Contact form route handler.
//!
//! Messages are appended to `contact_messages` for the team to read; there
//! is no duplicate check and nothing is sent anywhere.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use flexilearn_core::Email;

use crate::error::{AppError, Result};
use crate::models::NewContactMessage;
use crate::routes::{ApiJson, MessageResponse, non_blank};
use crate::state::AppState;

/// 400 message for a missing required field.
pub const REQUIRED_FIELDS: &str = "Full name, email, and message are required.";

/// Contact form request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Record a contact form submission.
///
/// POST /api/contact
#[instrument(skip(state, body), fields(email = body.email.as_deref().unwrap_or_default()))]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ContactRequest>,
) -> Result<(StatusCode, MessageResponse)> {
    let (Some(full_name), Some(email), Some(message)) = (
        non_blank(body.full_name.as_deref()),
        non_blank(body.email.as_deref()),
        non_blank(body.message.as_deref()),
    ) else {
        return Err(AppError::Validation(REQUIRED_FIELDS));
    };

    let contact = NewContactMessage {
        full_name: full_name.to_owned(),
        email: Email::parse(email)?,
        phone: body.phone,
        subject: body.subject,
        message: message.to_owned(),
    };

    let message_id = state.store().insert_contact_message(&contact).await?;

    tracing::info!(message_id = %message_id, "Contact message stored");
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Message sent successfully!"),
    ))
}
