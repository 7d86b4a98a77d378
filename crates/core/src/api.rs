//! Collaborator interfaces for the external services the action talks to.
//!
//! The event handler is generic over these so it can be tested with
//! substitute implementations, without any real network dependency.

use async_trait::async_trait;

use crate::context::{Conversation, IssueComment};
use crate::Error;

/// Read/write access to issue comments on the source-control platform.
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// List up to 100 most recent comments on an issue.
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>, Error>;

    /// Post a comment on an issue or pull request.
    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), Error>;
}

/// The AI conversation service.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Create a conversation from a prompt and return its identifier.
    async fn create_conversation(&self, prompt: &str) -> Result<Conversation, Error>;
}
