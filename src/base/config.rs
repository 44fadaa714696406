//! Load configuration via `config` crate with env-override support.

use std::{fmt, ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default Telegram Bot API base URL.
fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Default address the HTTP server binds to.
fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

/// Configuration for the relay.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, shared behind [`Config`].
#[derive(Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`).
    ///
    /// Not validated here: an empty token surfaces as a delivery failure.
    #[serde(default)]
    pub telegram_bot_token: String,
    /// Target chat identifier (`TELEGRAM_CHAT_ID`).
    #[serde(default)]
    pub telegram_chat_id: String,
    /// Telegram Bot API base URL (`TELEGRAM_API_URL`).
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    /// Socket address for the HTTP server (`BIND_ADDRESS`).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

// Credentials stay out of any `{:?}` output.
impl fmt::Debug for ConfigInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigInner")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_chat_id", &"<redacted>")
            .field("telegram_api_url", &self.telegram_api_url)
            .field("bind_address", &self.bind_address)
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment, layered over an optional TOML file.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        // Environment wins over the file.
        cfg = cfg.add_source(config::Environment::default());

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(anyhow::anyhow!("Bind address `{}` is not a valid socket address.", result.bind_address));
        }

        Ok(result)
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}
