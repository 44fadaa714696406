//! Common types shared by the endpoints, renderers, and chat clients.

use serde_json::Value;

/// Application error type.
pub type Err = anyhow::Error;
/// Application result type.
pub type Res<T> = Result<T, Err>;
/// Result carrying no value.
pub type Void = Res<()>;

/// One inbound webhook delivery: the event kind from the transport header and the decoded body.
#[derive(Debug, Clone)]
pub struct WebhookDelivery {
    /// Value of the `x-github-event` header, if one was sent.
    pub kind: Option<String>,
    /// The decoded request body.
    pub payload: Value,
}

/// A fully composed chat message, ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    /// The composed message.
    pub text: String,
    /// Whether `text` carries HTML markup the sink should parse.
    pub formatted: bool,
}

impl RenderedNotification {
    /// A notification whose text is HTML.
    pub fn html(text: String) -> Self {
        Self { text, formatted: true }
    }

    /// A notification whose text is sent as-is.
    pub fn plain(text: String) -> Self {
        Self { text, formatted: false }
    }
}

/// Result of a single delivery attempt to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The sink accepted the message.
    Delivered,
    /// The call failed or the sink answered with a non-2xx status.
    Failed(String),
}

impl DeliveryOutcome {
    /// Whether the sink accepted the message.
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}
