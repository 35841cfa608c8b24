//! Account route handlers.
//!
//! Signup and login. Both delegate to [`AuthService`]; this module only
//! checks field presence and shapes responses.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::routes::{ApiJson, MessageResponse, non_blank};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// 400 message when signup or login is missing a field.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";

// =============================================================================
// Request / Response Types
// =============================================================================

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: User,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new user.
///
/// POST /api/signup
#[instrument(skip(state, body), fields(email = body.email.as_deref().unwrap_or_default()))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> Result<(StatusCode, MessageResponse)> {
    let (Some(name), Some(email), Some(password)) = (
        non_blank(body.name.as_deref()),
        non_blank(body.email.as_deref()),
        non_blank(body.password.as_deref()),
    ) else {
        return Err(AppError::Validation(ALL_FIELDS_REQUIRED));
    };

    let auth = AuthService::new(state.store(), state.config().password_storage);
    let user_id = auth.register(name, email, password).await?;

    tracing::info!(user_id = %user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("User registered successfully!"),
    ))
}

/// Check credentials and return the matching user.
///
/// POST /api/login
///
/// Unknown email and wrong password produce the same 401.
#[instrument(skip(state, body), fields(email = body.email.as_deref().unwrap_or_default()))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        non_blank(body.email.as_deref()),
        non_blank(body.password.as_deref()),
    ) else {
        return Err(AppError::Validation(ALL_FIELDS_REQUIRED));
    };

    let auth = AuthService::new(state.store(), state.config().password_storage);
    let user = auth.login(email, password).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        message: "Login successful",
        user,
    }))
}
