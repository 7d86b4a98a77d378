//! Action configuration, loaded from the runner environment in one step.
//!
//! Keeping every environment read here leaves the prompt builder and the
//! handler pure and unit-testable without environment mocking.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use wakumo_action_core::PromptVariant;

/// Immutable configuration for a single action run.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Wakumo API key. Presence is validated by the handler before any
    /// network call.
    pub wkm_api_key: Option<String>,
    /// Optional Wakumo endpoint override, applied only when non-blank.
    pub wkm_api_url: Option<String>,
    pub github_token: String,
    pub owner: String,
    pub repo: String,
    /// Path to the JSON event payload written by the runner.
    pub event_path: PathBuf,
    pub system_prompt: Option<String>,
    pub append_system_prompt: Option<String>,
    pub variant: PromptVariant,
}

impl ActionConfig {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN").context("GITHUB_TOKEN not set")?;
        let repository = env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY not set")?;
        let (owner, repo) = split_repository(&repository)?;
        let event_path: PathBuf = env::var("GITHUB_EVENT_PATH")
            .context("GITHUB_EVENT_PATH not set")?
            .into();

        let variant = match input_var("PROMPT_VARIANT") {
            Some(value) => PromptVariant::from_input(&value)
                .with_context(|| format!("Unknown PROMPT_VARIANT: {value}"))?,
            None => PromptVariant::default(),
        };

        Ok(Self {
            wkm_api_key: input_var("WKM_API_KEY"),
            wkm_api_url: input_var("WKM_API_URL"),
            github_token,
            owner,
            repo,
            event_path,
            system_prompt: plain_var("SYSTEM_PROMPT"),
            append_system_prompt: plain_var("APPEND_SYSTEM_PROMPT"),
            variant,
        })
    }
}

/// Split `GITHUB_REPOSITORY` ("owner/repo") into its parts.
fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => bail!("GITHUB_REPOSITORY is not owner/repo: {repository}"),
    }
}

/// Action inputs arrive as `INPUT_<NAME>`; the bare name is accepted too
/// for local runs.
fn input_var(name: &str) -> Option<String> {
    env::var(format!("INPUT_{name}"))
        .ok()
        .or_else(|| env::var(name).ok())
        .filter(|value| !value.is_empty())
}

fn plain_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
