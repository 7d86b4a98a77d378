//! Wakumo AI GitHub Action entrypoint.
//!
//! One event in, one terminal outcome out: read configuration and the
//! event payload from the runner environment, run the handler, and report
//! any failure through the Actions error marker with a non-zero exit.

use std::fs;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wakumo_action_ai::WakumoClient;
use wakumo_action_github::{EventPayload, GithubClient};

mod config;
mod handler;

use config::ActionConfig;
use handler::Outcome;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {err}");
    }

    if let Err(err) = run().await {
        // Actions failure marker, the equivalent of core.setFailed.
        println!("::error::Action failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    info!("Wakumo AI action starting");

    let config = ActionConfig::from_env()?;

    let raw = fs::read(&config.event_path).with_context(|| {
        format!(
            "Failed to read event payload at {}",
            config.event_path.display()
        )
    })?;
    let payload: EventPayload =
        serde_json::from_slice(&raw).context("Failed to parse event payload JSON")?;

    let github = GithubClient::new(&config.github_token, &config.owner, &config.repo)?;

    let outcome = handler::run(&config, &payload, &github, |api_key, api_url| {
        let client = WakumoClient::new(api_key)?;
        Ok(match api_url {
            Some(url) => client.with_base_url(url),
            None => client,
        })
    })
    .await?;

    match outcome {
        Outcome::Skipped => info!("No trigger tag found, nothing to do"),
        Outcome::Completed { conversation_id } => {
            info!(conversation = %conversation_id, "Posted conversation link");
        }
    }

    Ok(())
}
