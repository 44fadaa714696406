//! Chat service integration for the relay.
//!
//! This module delivers rendered notifications to a chat platform. It defines the
//! `GenericChatClient` trait that can be implemented for different chat services,
//! with a default implementation for Telegram.

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::DeliveryOutcome;

pub mod telegram;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// Implementing this trait allows different chat services to receive the relay's
/// notifications.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Deliver a message to the configured chat.
    ///
    /// Makes exactly one attempt. `formatted` asks the platform to parse `text` as HTML and
    /// to skip link previews.
    async fn deliver(&self, text: &str, formatted: bool) -> DeliveryOutcome;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
