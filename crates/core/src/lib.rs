//! Core types for the Wakumo AI GitHub Action.
//!
//! Everything here is request-scoped: an action run builds an
//! [`IssueContext`] from the event payload, derives a prompt from it, and
//! discards it when the run completes.

pub mod api;
pub mod context;

pub use api::{ConversationService, IssueApi};
pub use context::{Conversation, IssueComment, IssueContext, PromptOptions, PromptVariant};

/// Mention that activates the workflow when found in event text.
pub const TRIGGER_TAG: &str = "@wakumo-ai";

/// Login substring identifying the bot's own comments (case-sensitive).
pub const BOT_LOGIN: &str = "wakumo-ai";

/// Error types shared across the action crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GithubApi(String),

    #[error("Wakumo API error: {0}")]
    WakumoApi(String),
}
