//! Wakumo AI API client.
//!
//! One call per run: create a conversation from the built prompt and read
//! back its identifier. No retries; a failed call fails the run.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use wakumo_action_core::{Conversation, ConversationService, Error};

const DEFAULT_BASE_URL: &str = "https://api.wakumo.ai";

/// Wakumo AI client.
pub struct WakumoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WakumoClient {
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(api_err)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Override the service endpoint. Only applied by the caller when the
    /// configured value is non-blank.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn api_err(err: reqwest::Error) -> Error {
    Error::WakumoApi(err.to_string())
}

#[async_trait]
impl ConversationService for WakumoClient {
    async fn create_conversation(&self, prompt: &str) -> Result<Conversation, Error> {
        let url = format!("{}/v1/conversations", self.base_url);
        debug!(url = %url, "Creating Wakumo conversation");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({ "text": prompt }))
            .send()
            .await
            .map_err(api_err)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::WakumoApi(format!("{status} - {body}")));
        }

        resp.json().await.map_err(api_err)
    }
}
