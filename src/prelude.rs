pub use crate::base::{
    config::Config,
    error::{DeliveryError, RelayError, RenderError},
    types::{DeliveryOutcome, Err, RenderedNotification, Res, Void, WebhookDelivery},
};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
