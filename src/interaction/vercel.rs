//! Rendering of hosting-platform deployment hooks.

use serde::Deserialize;
use serde_json::Value;

use crate::base::{error::RenderError, types::RenderedNotification};

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentHook {
    pub payload: DeploymentInfo,
}

/// Placeholder for a field the hook left out.
pub const MISSING_FIELD: &str = "unknown";

/// Summary fields of a deployment. Hooks omit some of them, so each one is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "readyState")]
    pub ready_state: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Render a deployment hook as plain text.
pub fn render(body: &Value) -> Result<RenderedNotification, RenderError> {
    let hook = DeploymentHook::deserialize(body).map_err(|source| RenderError {
        kind: "vercel-deploy".to_string(),
        source,
    })?;

    let info = hook.payload;
    let text = format!(
        "🚀 Vercel Deployment\nProject: {}\nStatus: {}\nURL: {}",
        info.name.as_deref().unwrap_or(MISSING_FIELD),
        info.ready_state.as_deref().unwrap_or(MISSING_FIELD),
        info.url.as_deref().unwrap_or(MISSING_FIELD)
    );

    Ok(RenderedNotification::plain(text))
}
