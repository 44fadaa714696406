//! HTTP endpoints: decode the delivery, render it, hand it to the chat client.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use serde_json::{Value, json};

use crate::{
    interaction::{github, vercel},
    prelude::*,
    runtime::Runtime,
    service::chat::ChatClient,
};

/// Header GitHub uses to name the event kind.
pub const GITHUB_EVENT_HEADER: &str = "x-github-event";

fn ok_body() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    ok_body()
}

/// The event kind named by the delivery's header.
///
/// Bytes that are not UTF-8 are replaced rather than dropping the header.
fn event_kind(headers: &HeaderMap) -> Option<String> {
    headers.get(GITHUB_EVENT_HEADER).map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// POST /api/github-webhook
#[instrument(skip_all)]
pub async fn github_webhook(State(runtime): State<Runtime>, headers: HeaderMap, body: Bytes) -> Result<Json<Value>, RelayError> {
    let kind = event_kind(&headers);

    let result = github_webhook_internal(kind, &body, &runtime.chat).await;

    if let Err(err) = &result {
        error!("Error processing webhook: {}", err);
    }

    result.map(|_| ok_body())
}

#[instrument(skip_all, fields(kind = kind.as_deref().unwrap_or_default()))]
async fn github_webhook_internal(kind: Option<String>, body: &[u8], chat: &ChatClient) -> Result<(), RelayError> {
    let payload: Value = serde_json::from_slice(body).map_err(RelayError::Body)?;
    let delivery = WebhookDelivery { kind, payload };

    info!("Received GitHub delivery ...");

    let notification = github::render(delivery.kind.as_deref(), &delivery.payload)?;

    relay(chat, &notification).await
}

/// POST /api/vercel-deploy
#[instrument(skip_all)]
pub async fn vercel_deploy(State(runtime): State<Runtime>, body: Bytes) -> Result<Json<Value>, RelayError> {
    let result = vercel_deploy_internal(&body, &runtime.chat).await;

    if let Err(err) = &result {
        error!("Error processing deployment hook: {}", err);
    }

    result.map(|_| ok_body())
}

async fn vercel_deploy_internal(body: &[u8], chat: &ChatClient) -> Result<(), RelayError> {
    let payload: Value = serde_json::from_slice(body).map_err(RelayError::Body)?;

    info!("Received deployment hook ...");

    let notification = vercel::render(&payload)?;

    relay(chat, &notification).await
}

/// Make the single delivery attempt for a notification.
async fn relay(chat: &ChatClient, notification: &RenderedNotification) -> Result<(), RelayError> {
    match chat.deliver(&notification.text, notification.formatted).await {
        DeliveryOutcome::Delivered => {
            info!("Notification delivered.");
            Ok(())
        }
        DeliveryOutcome::Failed(reason) => Err(DeliveryError(reason).into()),
    }
}
