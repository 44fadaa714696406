#![cfg(test)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    routing::post,
};
use mockall::{mock, predicate};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use ella_relay::{
    base::{
        config::{Config, ConfigInner},
        types::DeliveryOutcome,
    },
    interaction::router,
    runtime::Runtime,
    service::chat::{ChatClient, GenericChatClient, telegram::TelegramChatClient},
};

// Mocks.

// Mock chat client for testing.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        async fn deliver(&self, text: &str, formatted: bool) -> DeliveryOutcome;
    }
}

// Helpers.

fn test_config() -> Config {
    Config::from(ConfigInner {
        telegram_bot_token: "123:test".to_string(),
        telegram_chat_id: "-1001".to_string(),
        telegram_api_url: "http://unused".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
    })
}

fn app_with(chat: MockChat) -> Router {
    router(Runtime::with_chat(test_config(), ChatClient::new(Arc::new(chat))))
}

fn github_request(kind: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/api/github-webhook").header("content-type", "application/json");

    if let Some(kind) = kind {
        builder = builder.header("x-github-event", kind);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn push_body() -> String {
    json!({
        "repository": { "full_name": "o/r", "html_url": "https://x/o/r" },
        "head_commit": {
            "author": { "name": "A" },
            "message": "fix bug\nmore detail",
            "url": "https://x/commit/1"
        },
        "ref": "refs/heads/main"
    })
    .to_string()
}

/// A captured `sendMessage` call made against the local sink.
#[derive(Debug, Clone)]
struct SinkCall {
    path: String,
    body: Value,
}

/// Serve a fake Bot API on an ephemeral port that answers every call with `status`.
async fn spawn_sink(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<SinkCall>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();

    let app = Router::new().route(
        "/{bot}/sendMessage",
        post(move |axum::extract::Path(bot): axum::extract::Path<String>, Json(body): Json<Value>| {
            let recorded = recorded.clone();
            let reply = reply.clone();
            async move {
                recorded.lock().unwrap().push(SinkCall {
                    path: format!("/{bot}/sendMessage"),
                    body,
                });
                (status, Json(reply))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), calls)
}

fn telegram_client(api_url: &str) -> TelegramChatClient {
    let config = Config::from(ConfigInner {
        telegram_api_url: api_url.to_string(),
        ..(*test_config().inner).clone()
    });

    TelegramChatClient::new(&config).unwrap()
}

// Endpoint tests.

#[tokio::test]
async fn push_delivery_is_rendered_and_relayed() {
    let mut chat = MockChat::new();
    chat.expect_deliver()
        .withf(|text, formatted| {
            *formatted
                && text.contains("o/r")
                && text.contains("A")
                && text.contains("main")
                && text.contains("fix bug")
                && text.contains("https://x/commit/1")
                && !text.contains("more detail")
        })
        .times(1)
        .returning(|_, _| DeliveryOutcome::Delivered);

    let response = app_with(chat).oneshot(github_request(Some("push"), &push_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn failed_delivery_returns_generic_error() {
    let mut chat = MockChat::new();
    chat.expect_deliver().times(1).returning(|_, _| DeliveryOutcome::Failed("connection refused".to_string()));

    let response = app_with(chat).oneshot(github_request(Some("push"), &push_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Webhook processing failed" }));
}

#[tokio::test]
async fn payload_missing_fields_is_rejected_without_delivery() {
    let mut chat = MockChat::new();
    chat.expect_deliver().never();

    let body = json!({ "action": "opened", "repository": { "full_name": "o/r", "html_url": "https://x/o/r" } }).to_string();
    let response = app_with(chat).oneshot(github_request(Some("issues"), &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Webhook processing failed" }));
}

#[tokio::test]
async fn malformed_body_returns_generic_error() {
    let mut chat = MockChat::new();
    chat.expect_deliver().never();

    let response = app_with(chat).oneshot(github_request(Some("push"), "not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Webhook processing failed" }));
}

#[tokio::test]
async fn unknown_and_missing_kinds_use_the_fallback() {
    for (kind, expected) in [(Some("star"), "Unhandled event type: star"), (None, "Unhandled event type: null")] {
        let mut chat = MockChat::new();
        chat.expect_deliver()
            .withf(move |text, _| text.contains(expected))
            .times(1)
            .returning(|_, _| DeliveryOutcome::Delivered);

        let body = json!({ "repository": { "full_name": "o/r", "html_url": "https://x/o/r" } }).to_string();
        let response = app_with(chat).oneshot(github_request(kind, &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn duplicate_deliveries_are_relayed_twice() {
    let mut chat = MockChat::new();
    chat.expect_deliver().times(2).returning(|_, _| DeliveryOutcome::Delivered);

    let app = app_with(chat);

    for _ in 0..2 {
        let response = app.clone().oneshot(github_request(Some("push"), &push_body())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn deployment_hook_is_relayed_as_plain_text() {
    let mut chat = MockChat::new();
    chat.expect_deliver()
        .with(predicate::eq("🚀 Vercel Deployment\nProject: site\nStatus: READY\nURL: site.vercel.app"), predicate::eq(false))
        .times(1)
        .returning(|_, _| DeliveryOutcome::Delivered);

    let body = json!({ "payload": { "name": "site", "readyState": "READY", "url": "site.vercel.app" } }).to_string();
    let request = Request::builder().method("POST").uri("/api/vercel-deploy").body(Body::from(body)).unwrap();

    let response = app_with(chat).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn partial_deployment_hook_is_still_relayed() {
    let mut chat = MockChat::new();
    chat.expect_deliver()
        .with(predicate::eq("🚀 Vercel Deployment\nProject: site\nStatus: unknown\nURL: site.vercel.app"), predicate::eq(false))
        .times(1)
        .returning(|_, _| DeliveryOutcome::Delivered);

    let body = json!({ "payload": { "name": "site", "url": "site.vercel.app" } }).to_string();
    let request = Request::builder().method("POST").uri("/api/vercel-deploy").body(Body::from(body)).unwrap();

    let response = app_with(chat).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let response = app_with(MockChat::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

// Dispatcher tests.

#[tokio::test]
async fn telegram_success_is_delivered() {
    let (url, calls) = spawn_sink(StatusCode::OK, json!({ "ok": true })).await;

    let outcome = telegram_client(&url).deliver("<b>hello</b>", true).await;

    assert_eq!(outcome, DeliveryOutcome::Delivered);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/bot123:test/sendMessage");
    assert_eq!(
        calls[0].body,
        json!({ "chat_id": "-1001", "text": "<b>hello</b>", "parse_mode": "HTML", "disable_web_page_preview": true })
    );
}

#[tokio::test]
async fn telegram_plain_text_omits_formatting_directives() {
    let (url, calls) = spawn_sink(StatusCode::OK, json!({ "ok": true })).await;

    let outcome = telegram_client(&url).deliver("hello", false).await;

    assert!(outcome.is_delivered());
    assert_eq!(calls.lock().unwrap()[0].body, json!({ "chat_id": "-1001", "text": "hello" }));
}

#[tokio::test]
async fn telegram_error_status_fails_with_reason() {
    let (url, calls) = spawn_sink(StatusCode::BAD_REQUEST, json!({ "ok": false, "error_code": 400, "description": "Bad Request: chat not found" })).await;

    let outcome = telegram_client(&url).deliver("hello", true).await;

    match outcome {
        DeliveryOutcome::Failed(reason) => {
            assert!(reason.contains("400"));
            assert!(reason.contains("chat not found"));
            assert!(!reason.contains("123:test"));
        }
        DeliveryOutcome::Delivered => panic!("expected a failed delivery"),
    }

    // Exactly one attempt.
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn telegram_server_error_fails() {
    let (url, _) = spawn_sink(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;

    let outcome = telegram_client(&url).deliver("hello", true).await;

    assert!(matches!(outcome, DeliveryOutcome::Failed(reason) if reason.contains("500")));
}

#[tokio::test]
async fn telegram_transport_error_fails_without_leaking_the_token() {
    // Reserve a port, then free it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = telegram_client(&format!("http://{addr}")).deliver("hello", true).await;

    match outcome {
        DeliveryOutcome::Failed(reason) => {
            assert!(!reason.is_empty());
            assert!(!reason.contains("123:test"));
        }
        DeliveryOutcome::Delivered => panic!("expected a failed delivery"),
    }
}
