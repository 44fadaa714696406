//! Library root for `ella-relay`.
//!
//! The relay receives webhook deliveries and forwards them to a chat as
//! human-readable notifications:
//! - GitHub events are classified by kind and rendered as HTML messages
//! - Deployment hooks are rendered as plain-text summaries
//! - Every notification is delivered with a single call to the chat platform
//!
//! The chat platform sits behind a trait, so the delivery target can be swapped
//! (or mocked in tests) without touching the endpoints.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::{info, warn};

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the relay:
/// - Initializes the crypto provider
/// - Creates the runtime context with the chat client
/// - Serves the webhook endpoints until shutdown
pub async fn start(config: Config) -> Void {
    info!("Starting ella-relay ...");

    // Start the crypto provider.
    if crypto::ring::default_provider().install_default().is_err() {
        warn!("A crypto provider was already installed.");
    }

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
