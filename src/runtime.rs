//! Runtime services and shared state for the relay.

use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction,
    service::chat::ChatClient,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client and configuration. It is designed to be
/// trivially cloneable, and is handed to every request as router state.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance backed by Telegram.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let chat = ChatClient::telegram(&config)?;

        Ok(Self { config, chat })
    }

    /// Create a runtime with an explicit chat client.
    pub fn with_chat(config: Config, chat: ChatClient) -> Self {
        Self { config, chat }
    }

    /// Serve the relay endpoints until Ctrl-C.
    pub async fn start(&self) -> Void {
        let listener = TcpListener::bind(&self.config.bind_address).await?;

        info!("Relay listening on {} ...", listener.local_addr()?);

        axum::serve(listener, interaction::router(self.clone())).with_graceful_shutdown(shutdown_signal()).await?;

        info!("Relay stopped.");

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }

    info!("Shutdown requested ...");
}
