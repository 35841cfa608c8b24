//! Live tests against a running API server.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the `flexilearn` schema
//! - The API server running (`cargo run -p flexilearn-api`)
//!
//! Run with: `cargo test -p flexilearn-integration-tests -- --ignored`
//!
//! Each run uses fresh email addresses so it can be repeated against the
//! same database.

#![allow(clippy::unwrap_used)]

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use flexilearn_integration_tests::{live_base_url, message};

/// An address nobody else has used.
fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}-{nanos}@flexilearn.test")
}

async fn post(client: &Client, path: &str, body: &Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}{path}", live_base_url()))
        .json(body)
        .send()
        .await
        .expect("Failed to reach the API server");

    let status = resp.status();
    let body = resp.json::<Value>().await.expect("Response was not JSON");
    (status, body)
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_signup_and_login_round_trip() {
    let client = Client::new();
    let email = unique_email("learner");
    let signup = json!({"name": "A", "email": email, "password": "p"});

    let (status, body) = post(&client, "/api/signup", &signup).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message(&body), "User registered successfully!");

    let (status, body) = post(&client, "/api/signup", &signup).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "User already exists.");

    let (status, body) = post(
        &client,
        "/api/login",
        &json!({"email": email, "password": "p"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"].get("password").is_none());

    let (status, body) = post(
        &client,
        "/api/login",
        &json!({"email": email, "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&body), "Invalid email or password.");
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_seller_register() {
    let client = Client::new();

    let (status, body) = post(
        &client,
        "/api/seller/register",
        &json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": unique_email("seller"),
            "phone": "555-0100",
            "companyName": "Analytical Engines",
            "businessType": "LLC",
            "sellerCategory": "Courses",
            "termsAgreed": true,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message(&body), "Seller registered successfully!");
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_contact() {
    let client = Client::new();

    let (status, body) = post(
        &client,
        "/api/contact",
        &json!({
            "fullName": "Grace Hopper",
            "email": unique_email("contact"),
            "message": "Do you offer classroom pricing?",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message(&body), "Message sent successfully!");
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_subscribe_twice() {
    let client = Client::new();
    let body = json!({"email": unique_email("subscriber")});

    let (first, _) = post(&client, "/api/subscribe", &body).await;
    let (second, response) = post(&client, "/api/subscribe", &body).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(message(&response), "You are already subscribed.");
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_missing_fields_are_rejected() {
    let client = Client::new();

    let (status, body) = post(&client, "/api/signup", &json!({"name": "A"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "All fields are required.");

    let (status, body) = post(&client, "/api/subscribe", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Email is required.");
}
