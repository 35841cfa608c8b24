//! FlexiLearn API library.
//!
//! The binary in `main.rs` is a thin wrapper around [`app`]; keeping the
//! router here lets tests drive it in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use state::AppState;

/// Build the complete application: routes, CORS, tracing and Sentry layers.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(state.config().cors_origins.as_deref());

    routes::routes()
        .layer(cors)
        .layer(middleware::trace_layer())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
