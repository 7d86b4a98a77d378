//! GitHub event payload parsing.
//!
//! The action runner writes the webhook payload to `GITHUB_EVENT_PATH`;
//! these are the nested shapes we care about for issue, issue-comment, and
//! PR-review events.

#![allow(dead_code)] // Deserialization structs have unused fields

use serde::Deserialize;

/// Top-level event payload for issue / comment / review events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pub issue: Option<Issue>,
    pub comment: Option<Comment>,
    pub review: Option<Review>,
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub body: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub body: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

impl EventPayload {
    /// Text to check for the trigger tag: comment body, else issue body,
    /// else review body. First non-empty wins.
    pub fn trigger_text(&self) -> &str {
        [
            self.comment.as_ref().and_then(|c| c.body.as_deref()),
            self.issue.as_ref().and_then(|i| i.body.as_deref()),
            self.review.as_ref().and_then(|r| r.body.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|body| !body.is_empty())
        .unwrap_or("")
    }

    /// Issue title, when the event carries an issue.
    pub fn title(&self) -> &str {
        self.issue
            .as_ref()
            .and_then(|i| i.title.as_deref())
            .unwrap_or("")
    }

    /// Issue body, empty for bare PR/review events.
    pub fn issue_body(&self) -> &str {
        self.issue
            .as_ref()
            .and_then(|i| i.body.as_deref())
            .unwrap_or("")
    }

    /// Number of the originating issue or pull request.
    pub fn issue_number(&self) -> u64 {
        self.issue
            .as_ref()
            .map(|i| i.number)
            .or_else(|| self.pull_request.as_ref().map(|pr| pr.number))
            .unwrap_or(0)
    }

    /// Login of the issue/PR author.
    pub fn author(&self) -> &str {
        self.issue
            .as_ref()
            .and_then(|i| i.user.as_ref())
            .or_else(|| self.pull_request.as_ref().and_then(|pr| pr.user.as_ref()))
            .map(|u| u.login.as_str())
            .unwrap_or("unknown")
    }

    /// Whether the event concerns an issue (comment history is only
    /// fetched for these).
    pub fn is_issue_event(&self) -> bool {
        self.issue.is_some()
    }

    /// Body of the inbound comment, for comment events.
    pub fn trigger_comment(&self) -> Option<String> {
        self.comment.as_ref().and_then(|c| c.body.clone())
    }
}
