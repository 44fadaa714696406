//! Inbound webhook handling for the relay.
//!
//! This module turns inbound deliveries into chat notifications:
//! - Classifying and rendering GitHub events
//! - Rendering deployment hooks
//! - Serving the HTTP endpoints that tie rendering to delivery

pub mod github;
pub mod vercel;
pub mod webhook;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::runtime::Runtime;

/// Build the HTTP router with every relay endpoint.
pub fn router(runtime: Runtime) -> Router {
    Router::new()
        .route("/health", get(webhook::health))
        .route("/api/github-webhook", post(webhook::github_webhook))
        .route("/api/vercel-deploy", post(webhook::vercel_deploy))
        .layer(TraceLayer::new_for_http())
        .with_state(runtime)
}
