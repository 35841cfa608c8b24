//! Seller registration route handler.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use flexilearn_core::Email;

use crate::config::SellerDuplicateCheck;
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::NewSeller;
use crate::routes::{ApiJson, MessageResponse, non_blank};
use crate::state::AppState;

/// 400 message for a missing field or unaccepted terms.
pub const REQUIRED_FIELDS: &str = "All required fields must be filled.";
/// 400 message for a duplicate seller email.
pub const SELLER_EXISTS: &str = "Seller already exists.";

/// Seller registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerRegistrationRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub business_type: Option<String>,
    pub seller_category: Option<String>,
    pub selected_plan: Option<String>,
    pub website: Option<String>,
    /// Checkbox value; clients send booleans, numbers or strings.
    pub terms_agreed: Option<Value>,
}

/// Register a seller.
///
/// POST /api/seller/register
#[instrument(skip(state, body), fields(email = body.email.as_deref().unwrap_or_default()))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SellerRegistrationRequest>,
) -> Result<(StatusCode, MessageResponse)> {
    let seller = validate(body)?;
    let store = state.store();

    let exists = match state.config().seller_duplicate_check {
        SellerDuplicateCheck::UserTable => store.find_user_by_email(&seller.email).await?.is_some(),
        SellerDuplicateCheck::SellerTable => store.seller_email_exists(&seller.email).await?,
    };
    if exists {
        return Err(AppError::Conflict(SELLER_EXISTS));
    }

    let seller_id = store.insert_seller(&seller).await.map_err(|e| match e {
        RepositoryError::Conflict(_) => AppError::Conflict(SELLER_EXISTS),
        other => AppError::Database(other),
    })?;

    tracing::info!(seller_id = %seller_id, "Seller registered");
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Seller registered successfully!"),
    ))
}

/// Check presence of every required field and build the row to insert.
fn validate(body: SellerRegistrationRequest) -> Result<NewSeller> {
    if !is_truthy(body.terms_agreed.as_ref()) {
        return Err(AppError::Validation(REQUIRED_FIELDS));
    }

    let (
        Some(first_name),
        Some(last_name),
        Some(email),
        Some(phone),
        Some(company_name),
        Some(business_type),
        Some(seller_category),
    ) = (
        non_blank(body.first_name.as_deref()),
        non_blank(body.last_name.as_deref()),
        non_blank(body.email.as_deref()),
        non_blank(body.phone.as_deref()),
        non_blank(body.company_name.as_deref()),
        non_blank(body.business_type.as_deref()),
        non_blank(body.seller_category.as_deref()),
    )
    else {
        return Err(AppError::Validation(REQUIRED_FIELDS));
    };

    let email = Email::parse(email)?;

    Ok(NewSeller {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email,
        phone: phone.to_owned(),
        company_name: company_name.to_owned(),
        business_type: business_type.to_owned(),
        seller_category: seller_category.to_owned(),
        selected_plan: body.selected_plan,
        website: body.website,
        terms_agreed: true,
    })
}

/// Loose truthiness for the terms checkbox.
///
/// `true`, any non-zero number, and any non-empty string except `"false"`.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "false",
        _ => false,
    }
}
