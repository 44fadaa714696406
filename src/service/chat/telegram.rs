//! Telegram Bot API implementation of the chat client.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::base::{
    config::Config,
    types::{DeliveryOutcome, Res},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the telegram implementation.

impl ChatClient {
    /// Creates a new Telegram chat client.
    pub fn telegram(config: &Config) -> Res<Self> {
        let client = TelegramChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<TelegramChatClient> for ChatClient {
    fn from(client: TelegramChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Wire types.

/// Body of a `sendMessage` call.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_web_page_preview: Option<bool>,
}

/// Error body returned by the Bot API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    description: Option<String>,
}

// Structs.

/// Telegram client implementation.
#[derive(Clone)]
pub struct TelegramChatClient {
    client: reqwest::Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramChatClient {
    /// Create a new Telegram chat client.
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            api_url: config.telegram_api_url.trim_end_matches('/').to_string(),
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}

#[async_trait]
impl GenericChatClient for TelegramChatClient {
    #[instrument(name = "TelegramChatClient::deliver", skip_all, fields(formatted = formatted, length = text.len()))]
    async fn deliver(&self, text: &str, formatted: bool) -> DeliveryOutcome {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: formatted.then_some("HTML"),
            disable_web_page_preview: formatted.then_some(true),
        };

        // The URL embeds the bot token, so it is stripped from every error.
        let response = match self.client.post(self.send_message_url()).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                warn!("Telegram request failed: {}", e);
                return DeliveryOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();

        if status.is_success() {
            debug!("Telegram accepted the message.");
            return DeliveryOutcome::Delivered;
        }

        let description = response.json::<ApiErrorResponse>().await.ok().and_then(|body| body.description);

        let reason = match description {
            Some(description) => format!("Telegram responded with {status}: {description}"),
            None => format!("Telegram responded with {status}"),
        };

        warn!("{}", reason);

        DeliveryOutcome::Failed(reason)
    }
}

// Tests.
