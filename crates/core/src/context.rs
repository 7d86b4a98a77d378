//! Request-scoped context types for prompt construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single issue comment, as passed into prompt construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    pub user: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl IssueComment {
    /// Render the timestamp the way GitHub serializes it.
    pub fn created_at_str(&self) -> String {
        self.created_at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// The bundle of issue metadata handed to the prompt builder.
///
/// Built fresh from the event payload on every invocation; never persisted.
#[derive(Debug, Clone)]
pub struct IssueContext {
    pub title: String,
    pub body: String,
    pub issue_number: u64,
    pub author: String,
    pub owner: String,
    pub repo: String,
    pub comments: Vec<IssueComment>,
    /// Body of the comment that triggered the run, for comment events.
    pub trigger_comment: Option<String>,
}

/// Instruction set and reply wording to use for a run.
///
/// The two variants carry the diverging default instructions that used to
/// live in separate entrypoints; operators pick one via the
/// `PROMPT_VARIANT` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptVariant {
    /// Full instructions: todo list, analysis, PR workflow, capabilities.
    #[default]
    Standard,
    /// Condensed instructions without the PR-workflow walkthrough.
    Minimal,
}

impl PromptVariant {
    /// Parse an action input value. Unknown values map to `None`.
    pub fn from_input(value: &str) -> Option<Self> {
        match value.trim() {
            "" | "standard" => Some(Self::Standard),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

/// Operator overrides for prompt construction.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// Replaces the entire default prompt when non-blank.
    pub system_prompt: Option<String>,
    /// Appended to whatever prompt was produced, when non-blank.
    pub append_system_prompt: Option<String>,
    pub variant: PromptVariant,
}

/// A conversation created on the Wakumo AI service.
///
/// The action only reads the identifier back to compose the reply link.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
}
