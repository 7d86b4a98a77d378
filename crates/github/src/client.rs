//! GitHub REST client for reading and writing issue comments.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use wakumo_action_core::{Error, IssueApi, IssueComment};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "wakumo-action";

/// Client for the repository the action runs in.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
}

impl GithubClient {
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(api_err)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

fn api_err(err: reqwest::Error) -> Error {
    Error::GithubApi(err.to_string())
}

#[derive(Debug, Deserialize)]
struct CommentRow {
    user: Option<UserRow>,
    body: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    login: String,
}

impl From<CommentRow> for IssueComment {
    fn from(row: CommentRow) -> Self {
        Self {
            user: row
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "unknown".into()),
            body: row.body.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl IssueApi for GithubClient {
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>, Error> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments?per_page=100",
            self.base_url, self.owner, self.repo, issue_number
        );
        debug!(url = %url, "Listing issue comments");

        let resp = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(api_err)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::GithubApi(format!("{status} - {body}")));
        }

        let rows: Vec<CommentRow> = resp.json().await.map_err(api_err)?;
        Ok(rows.into_iter().map(IssueComment::from).collect())
    }

    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), Error> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, self.owner, self.repo, issue_number
        );
        debug!(url = %url, "Posting issue comment");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .map_err(api_err)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::GithubApi(format!("{status} - {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_row_mapping() {
        let row: CommentRow = serde_json::from_value(serde_json::json!({
            "user": { "login": "alice" },
            "body": "hello",
            "created_at": "2024-05-01T09:00:00Z"
        }))
        .unwrap();

        let comment = IssueComment::from(row);
        assert_eq!(comment.user, "alice");
        assert_eq!(comment.body, "hello");
        assert_eq!(comment.created_at_str(), "2024-05-01T09:00:00Z");
    }

    #[test]
    fn test_comment_row_defaults() {
        let row: CommentRow = serde_json::from_value(serde_json::json!({
            "created_at": "2024-05-01T09:00:00Z"
        }))
        .unwrap();

        let comment = IssueComment::from(row);
        assert_eq!(comment.user, "unknown");
        assert_eq!(comment.body, "");
    }
}
