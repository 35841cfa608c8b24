//! Newsletter subscription route handler.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use flexilearn_core::Email;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::routes::{ApiJson, MessageResponse, non_blank};
use crate::state::AppState;

/// 400 message for a duplicate subscription.
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed.";

/// Subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Subscribe an email address.
///
/// POST /api/subscribe
///
/// A failed lookup is a plain 500; a failed insert reports
/// "Subscription failed." instead.
#[instrument(skip(state, body), fields(email = body.email.as_deref().unwrap_or_default()))]
pub async fn subscribe(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SubscribeRequest>,
) -> Result<(StatusCode, MessageResponse)> {
    let Some(email) = non_blank(body.email.as_deref()) else {
        return Err(AppError::Validation("Email is required."));
    };
    let email = Email::parse(email)?;
    let store = state.store();

    if store.find_subscriber_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(ALREADY_SUBSCRIBED));
    }

    let subscriber_id = match store.insert_subscriber(&email).await {
        Ok(id) => id,
        Err(RepositoryError::Conflict(_)) => return Err(AppError::Conflict(ALREADY_SUBSCRIBED)),
        Err(e) => return Err(AppError::SubscriptionFailed(e)),
    };

    tracing::info!(subscriber_id = %subscriber_id, "Newsletter subscription successful");
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Subscription successful!"),
    ))
}
