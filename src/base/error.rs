//! Errors raised while relaying a delivery.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// The payload did not match the shape its declared event kind requires.
#[derive(Debug, Error)]
#[error("invalid `{kind}` payload: {source}")]
pub struct RenderError {
    /// The event kind the payload was decoded as.
    pub kind: String,
    /// What the decoder rejected.
    #[source]
    pub source: serde_json::Error,
}

/// The sink rejected the message or could not be reached.
#[derive(Debug, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Everything that can go wrong while processing one webhook delivery.
///
/// The variants are only told apart in the logs: every one of them maps to the same
/// generic 500 response for the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request body was not JSON.
    #[error("malformed request body: {0}")]
    Body(#[source] serde_json::Error),

    /// The payload did not fit its event kind.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The chat platform did not take the message.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = json!({ "error": "Webhook processing failed" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
