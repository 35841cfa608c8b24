//! Integration tests for the FlexiLearn API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no database needed)
//! cargo test -p flexilearn-integration-tests
//!
//! # Live tests against a running server and database
//! FLEXILEARN_BASE_URL=http://localhost:5001 \
//!     cargo test -p flexilearn-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_routes` - full router over [`MemoryStore`], driven with `oneshot`
//! - `live_server` - HTTP round trips with `reqwest` (ignored by default)

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use flexilearn_api::config::{ApiConfig, ConfigError};
use flexilearn_api::db::MemoryStore;
use flexilearn_api::state::AppState;

/// A router wired to an in-memory store the test can inspect.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    /// Build an app with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the default test configuration fails to load.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Build an app with extra `FLEXILEARN_*` settings on top of the defaults.
    ///
    /// # Panics
    ///
    /// Panics if the settings are invalid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = test_config(vars).expect("test configuration should load");
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config, store.clone());

        Self {
            store,
            router: flexilearn_api::app(state),
        }
    }

    /// POST a JSON value and return the status and decoded body.
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(path, Some("application/json"), body.to_string())
            .await
    }

    /// POST an arbitrary body and return the status and decoded body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the response is not JSON.
    #[allow(clippy::expect_used)]
    pub async fn post_raw(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: String,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri(path);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request
            .body(Body::from(body))
            .expect("request should build");

        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = serde_json::from_slice(&bytes).expect("response body should be JSON");

        (status, json)
    }

    /// Send a prepared request through the full middleware stack.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which axum routers never do.
    #[allow(clippy::expect_used)]
    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for in-process tests.
///
/// The database URL is never dialled; the store is in memory.
///
/// # Errors
///
/// Returns `ConfigError` if one of `vars` is invalid.
pub fn test_config(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
    ApiConfig::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
            .or_else(|| {
                (key == "FLEXILEARN_DATABASE_URL")
                    .then(|| "postgres://flexilearn@localhost/flexilearn_test".to_string())
            })
    })
}

/// Base URL of a running server for live tests.
#[must_use]
pub fn live_base_url() -> String {
    std::env::var("FLEXILEARN_BASE_URL").unwrap_or_else(|_| "http://localhost:5001".to_string())
}

/// The `message` field of a response body.
#[must_use]
pub fn message(body: &Value) -> &str {
    body.get("message").and_then(Value::as_str).unwrap_or_default()
}
