//! Classification and rendering of GitHub webhook deliveries.
//!
//! Each supported event kind decodes into its own typed payload, so a delivery that lacks a
//! field its kind needs fails before any text is produced.

use chrono::{Local, Timelike};
use rand::Rng;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::base::{
    error::RenderError,
    greetings::{greeting_for_hour, status_quote},
    types::RenderedNotification,
};

/// Maximum number of characters kept from a commit headline.
pub const COMMIT_HEADLINE_LIMIT: usize = 60;

/// Placeholder used when a deployment status carries no description.
pub const NO_DESCRIPTION: &str = "No description";

// Payload shapes.

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    pub author: CommitAuthor,
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub head_commit: HeadCommit,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    pub sender: User,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forkee {
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForkEvent {
    pub forkee: Forkee,
    pub sender: User,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub head: BranchRef,
    pub base: BranchRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub sender: User,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    pub environment: String,
    pub sha: String,
    pub creator: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentEvent {
    pub deployment: Deployment,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentTarget {
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentStatus {
    pub state: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentStatusEvent {
    pub deployment: DeploymentTarget,
    pub deployment_status: DeploymentStatus,
    pub repository: Repository,
}

// Classification.

/// A GitHub delivery classified by its event kind.
#[derive(Debug, Clone)]
pub enum GithubEvent {
    Push(PushEvent),
    Issues(IssuesEvent),
    Fork(ForkEvent),
    PullRequest(PullRequestEvent),
    Deployment(DeploymentEvent),
    DeploymentStatus(DeploymentStatusEvent),
    /// Any kind without a dedicated rendering, including a missing header.
    Unhandled { kind: Option<String>, repository: Option<Repository> },
}

impl GithubEvent {
    /// Decode `payload` according to `kind`.
    ///
    /// Known kinds fail with a [`RenderError`] when a required field is absent or mistyped.
    /// Unknown kinds never fail.
    pub fn decode(kind: Option<&str>, payload: &Value) -> Result<Self, RenderError> {
        let event = match kind {
            Some(k @ "push") => Self::Push(decode_as(k, payload)?),
            Some(k @ "issues") => Self::Issues(decode_as(k, payload)?),
            Some(k @ "fork") => Self::Fork(decode_as(k, payload)?),
            Some(k @ "pull_request") => Self::PullRequest(decode_as(k, payload)?),
            Some(k @ "deployment") => Self::Deployment(decode_as(k, payload)?),
            Some(k @ "deployment_status") => Self::DeploymentStatus(decode_as(k, payload)?),
            other => Self::Unhandled {
                kind: other.map(str::to_string),
                repository: payload.get("repository").and_then(|r| Repository::deserialize(r).ok()),
            },
        };

        Ok(event)
    }

    /// The repository the delivery belongs to, when known.
    pub fn repository(&self) -> Option<&Repository> {
        match self {
            Self::Push(e) => Some(&e.repository),
            Self::Issues(e) => Some(&e.repository),
            Self::Fork(e) => Some(&e.repository),
            Self::PullRequest(e) => Some(&e.repository),
            Self::Deployment(e) => Some(&e.repository),
            Self::DeploymentStatus(e) => Some(&e.repository),
            Self::Unhandled { repository, .. } => repository.as_ref(),
        }
    }
}

fn decode_as<T: DeserializeOwned>(kind: &str, payload: &Value) -> Result<T, RenderError> {
    T::deserialize(payload).map_err(|source| RenderError { kind: kind.to_string(), source })
}

// Rendering.

/// Render a GitHub delivery using the current local hour and the thread-local random source.
pub fn render(kind: Option<&str>, payload: &Value) -> Result<RenderedNotification, RenderError> {
    render_at(kind, payload, Local::now().hour(), &mut rand::thread_rng())
}

/// Render a GitHub delivery for a given hour of day, drawing the status quote from `rng`.
pub fn render_at<R: Rng + ?Sized>(kind: Option<&str>, payload: &Value, hour: u32, rng: &mut R) -> Result<RenderedNotification, RenderError> {
    let event = GithubEvent::decode(kind, payload)?;

    let mut text = format!(
        "{}\n\n🧠 <b>Status Update from your ELLA Bot</b>\n\n🗂️ <b>GitHub Event:</b> {}\n\n",
        greeting_for_hour(hour),
        escape(kind_label(kind))
    );

    text.push_str(&render_section(&event));

    if let Some(repository) = event.repository() {
        text.push_str(&format!(
            "\n\n🏠 <b>Repository:</b> <a href=\"{}\">{}</a>",
            escape(&repository.html_url),
            escape(&repository.full_name)
        ));
    }

    text.push_str(&format!("\n\n💬 <i>{}</i>", status_quote(rng)));
    text.push_str("\n\n🕹️ <i>ELLA at your service.</i>");

    Ok(RenderedNotification::html(text))
}

fn render_section(event: &GithubEvent) -> String {
    match event {
        GithubEvent::Push(e) => format!(
            "🏷️ <b>Repository:</b> {}\n👤 <b>Author:</b> {}\n🌿 <b>Branch:</b> {}\n📌 <b>Commit:</b> {}\n🔗 <a href=\"{}\">View Commit</a>\n",
            escape(&e.repository.full_name),
            escape(&e.head_commit.author.name),
            escape(branch_name(&e.git_ref)),
            escape(&commit_headline(&e.head_commit.message)),
            escape(&e.head_commit.url),
        ),
        GithubEvent::Issues(e) => format!(
            "📑 <b>Issue #{}:</b> {}\n✍️ <b>Title:</b> {}\n👤 <b>By:</b> {}\n🔗 <a href=\"{}\">View Issue</a>\n\n⚠️ Recommendation: You might want to look at this, sir.",
            e.issue.number,
            escape(&e.action),
            escape(&e.issue.title),
            escape(&e.sender.login),
            escape(&e.issue.html_url),
        ),
        GithubEvent::Fork(e) => format!(
            "🍴 <b>New Fork Created</b>\n👤 <b>Forked by:</b> {}\n🏷️ <b>Original:</b> {}\n🆕 <b>New Fork:</b> {}\n🔗 <a href=\"{}\">View Fork</a>\n",
            escape(&e.sender.login),
            escape(&e.repository.full_name),
            escape(&e.forkee.full_name),
            escape(&e.forkee.html_url),
        ),
        GithubEvent::PullRequest(e) => format!(
            "🔄 <b>Pull Request #{}:</b> {}\n✍️ <b>Title:</b> {}\n👤 <b>By:</b> {}\n🌿 <b>Branch:</b> {} → {}\n🔗 <a href=\"{}\">View PR</a>\n",
            e.pull_request.number,
            escape(&e.action),
            escape(&e.pull_request.title),
            escape(&e.sender.login),
            escape(&e.pull_request.head.name),
            escape(&e.pull_request.base.name),
            escape(&e.pull_request.html_url),
        ),
        GithubEvent::Deployment(e) => format!(
            "🚀 <b>New Deployment Triggered</b>\n🏷️ <b>Environment:</b> {}\n👤 <b>By:</b> {}\n🔗 <a href=\"{}/commit/{}\">View Commit</a>\n\n🧪 Initiating post-deployment diagnostics...",
            escape(&e.deployment.environment),
            escape(&e.deployment.creator.login),
            escape(&e.repository.html_url),
            escape(&e.deployment.sha),
        ),
        GithubEvent::DeploymentStatus(e) => {
            let description = e.deployment_status.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(NO_DESCRIPTION);

            format!(
                "🔄 <b>Deployment Status Update</b>\n🏷️ <b>Environment:</b> {}\n📊 <b>Status:</b> {}\n📝 <b>Description:</b> {}\n\n🔧 Monitoring status, Chief.",
                escape(&e.deployment.environment),
                escape(&e.deployment_status.state),
                escape(description),
            )
        }
        GithubEvent::Unhandled { kind, .. } => format!(
            "ℹ️ Unhandled event type: {}\n🔍 Please check the payload for more insights, sir.",
            escape(kind_label(kind.as_deref()))
        ),
    }
}

/// How a (possibly missing) event kind is shown to the reader.
fn kind_label(kind: Option<&str>) -> &str {
    kind.unwrap_or("null")
}

/// Last path segment of a git ref (`refs/heads/main` becomes `main`).
pub fn branch_name(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

/// First line of a commit message, cut to [`COMMIT_HEADLINE_LIMIT`] characters.
pub fn commit_headline(message: &str) -> String {
    message.lines().next().unwrap_or_default().chars().take(COMMIT_HEADLINE_LIMIT).collect()
}

/// Escape text for the sink's HTML parse mode.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }

    escaped
}
