//! The event handler: gate, fetch, build, create, post.
//!
//! Generic over the collaborator traits so it runs against substitute
//! clients in tests. The Wakumo client is built through a factory closure,
//! after the credential check and the trigger gate, so an untriggered or
//! misconfigured run never constructs it.

use tracing::info;

use wakumo_action_core::{
    ConversationService, Error, IssueApi, IssueContext, PromptOptions, BOT_LOGIN, TRIGGER_TAG,
};
use wakumo_action_github::EventPayload;
use wakumo_action_prompt::{build_prompt, reply_message};

use crate::config::ActionConfig;

/// Terminal outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Trigger tag absent; nothing was done.
    Skipped,
    /// Conversation created and reply posted.
    Completed { conversation_id: String },
}

pub async fn run<G, W, F>(
    config: &ActionConfig,
    payload: &EventPayload,
    github: &G,
    make_wakumo: F,
) -> Result<Outcome, Error>
where
    G: IssueApi,
    W: ConversationService,
    F: FnOnce(&str, Option<&str>) -> Result<W, Error>,
{
    // Required credential first, before any network call.
    let api_key = config
        .wkm_api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| Error::Config("WKM_API_KEY is required".into()))?;

    let trigger_text = payload.trigger_text();
    let title = payload.title();
    if !trigger_text.contains(TRIGGER_TAG) && !title.contains(TRIGGER_TAG) {
        info!("No {TRIGGER_TAG} tag found, exiting");
        return Ok(Outcome::Skipped);
    }

    let issue_number = payload.issue_number();

    // Comment history only exists for issue events; bare PR/review events
    // get an empty sequence.
    let comments = if payload.is_issue_event() {
        github
            .list_comments(issue_number)
            .await?
            .into_iter()
            .filter(|c| !c.user.contains(BOT_LOGIN))
            .collect()
    } else {
        Vec::new()
    };

    let context = IssueContext {
        title: title.to_string(),
        body: payload.issue_body().to_string(),
        issue_number,
        author: payload.author().to_string(),
        owner: config.owner.clone(),
        repo: config.repo.clone(),
        comments,
        trigger_comment: payload.trigger_comment(),
    };

    let options = PromptOptions {
        system_prompt: config.system_prompt.clone(),
        append_system_prompt: config.append_system_prompt.clone(),
        variant: config.variant,
    };

    let prompt = build_prompt(&context, &options);
    info!(
        issue = issue_number,
        prompt_len = prompt.len(),
        "Built prompt"
    );

    let api_url = config
        .wkm_api_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    let wakumo = make_wakumo(api_key, api_url)?;

    let conversation = wakumo.create_conversation(&prompt).await?;
    info!(conversation = %conversation.id, "Conversation created");

    // Best effort from here: the conversation already exists upstream even
    // if posting fails.
    let message = reply_message(config.variant, &conversation.id);
    github.post_comment(issue_number, &message).await?;

    Ok(Outcome::Completed {
        conversation_id: conversation.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use wakumo_action_core::{Conversation, IssueComment, PromptVariant};

    #[derive(Default)]
    struct FakeGithub {
        comments: Vec<IssueComment>,
        list_calls: AtomicUsize,
        posted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl IssueApi for FakeGithub {
        async fn list_comments(&self, _issue_number: u64) -> Result<Vec<IssueComment>, Error> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.comments.clone())
        }

        async fn post_comment(&self, _issue_number: u64, body: &str) -> Result<(), Error> {
            self.posted.lock().unwrap().push(body.to_string());
            Ok(())
        }
    }

    struct FakeWakumo {
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ConversationService for FakeWakumo {
        async fn create_conversation(&self, prompt: &str) -> Result<Conversation, Error> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Conversation {
                id: "conv-42".into(),
            })
        }
    }

    fn make_config() -> ActionConfig {
        ActionConfig {
            wkm_api_key: Some("wkm-key".into()),
            wkm_api_url: None,
            github_token: "gh-token".into(),
            owner: "wakumo".into(),
            repo: "webapp".into(),
            event_path: PathBuf::from("/dev/null"),
            system_prompt: None,
            append_system_prompt: None,
            variant: PromptVariant::Standard,
        }
    }

    fn issue_payload(title: &str, body: &str) -> EventPayload {
        serde_json::from_value(serde_json::json!({
            "issue": {
                "number": 42,
                "title": title,
                "body": body,
                "user": { "login": "alice" }
            }
        }))
        .unwrap()
    }

    fn make_comment(user: &str, body: &str) -> IssueComment {
        IssueComment {
            user: user.into(),
            body: body.into(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    async fn run_with(
        config: &ActionConfig,
        payload: &EventPayload,
        github: &FakeGithub,
    ) -> (Result<Outcome, Error>, Vec<String>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let captured = prompts.clone();
        let result = run(config, payload, github, |_, _| {
            Ok(FakeWakumo { prompts: captured })
        })
        .await;
        let seen = prompts.lock().unwrap().clone();
        (result, seen)
    }

    #[tokio::test]
    async fn test_gate_passes_via_title() {
        let github = FakeGithub::default();
        let payload = issue_payload("Fix bug @wakumo-ai", "");

        let (result, prompts) = run_with(&make_config(), &payload, &github).await;

        assert_eq!(
            result.unwrap(),
            Outcome::Completed {
                conversation_id: "conv-42".into()
            }
        );
        assert_eq!(github.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Title: Fix bug @wakumo-ai"));
    }

    #[tokio::test]
    async fn test_no_trigger_is_noop() {
        let github = FakeGithub::default();
        let payload = issue_payload("Fix bug", "Nothing to see here");

        let (result, prompts) = run_with(&make_config(), &payload, &github).await;

        assert_eq!(result.unwrap(), Outcome::Skipped);
        assert_eq!(github.list_calls.load(Ordering::SeqCst), 0);
        assert!(github.posted.lock().unwrap().is_empty());
        assert!(prompts.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        let github = FakeGithub::default();
        let payload = issue_payload("Fix bug @wakumo-ai", "");
        let mut config = make_config();
        config.wkm_api_key = None;

        let result = run(&config, &payload, &github, |_, _| -> Result<FakeWakumo, Error> {
            panic!("Wakumo client constructed without credential")
        })
        .await;

        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(github.list_calls.load(Ordering::SeqCst), 0);
        assert!(github.posted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_credential_is_missing() {
        let github = FakeGithub::default();
        let payload = issue_payload("Fix bug @wakumo-ai", "");
        let mut config = make_config();
        config.wkm_api_key = Some("   ".into());

        let result = run(&config, &payload, &github, |_, _| -> Result<FakeWakumo, Error> {
            panic!("Wakumo client constructed without credential")
        })
        .await;

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_bot_comments_excluded() {
        let github = FakeGithub {
            comments: vec![
                make_comment("bob", "Human comment"),
                make_comment("wakumo-ai", "Earlier bot reply"),
                make_comment("wakumo-ai[bot]", "Bot app reply"),
            ],
            ..Default::default()
        };
        let payload = issue_payload("Fix bug @wakumo-ai", "");

        let (result, prompts) = run_with(&make_config(), &payload, &github).await;

        result.unwrap();
        assert!(prompts[0].contains("Human comment"));
        assert!(!prompts[0].contains("Earlier bot reply"));
        assert!(!prompts[0].contains("Bot app reply"));
    }

    #[tokio::test]
    async fn test_comment_event_carries_trigger_comment() {
        let github = FakeGithub::default();
        let payload: EventPayload = serde_json::from_value(serde_json::json!({
            "issue": {
                "number": 42,
                "title": "Fix bug",
                "body": "Body",
                "user": { "login": "alice" }
            },
            "comment": {
                "body": "@wakumo-ai please take a look",
                "user": { "login": "bob" }
            }
        }))
        .unwrap();

        let (result, prompts) = run_with(&make_config(), &payload, &github).await;

        result.unwrap();
        assert!(prompts[0]
            .contains("<trigger_comment>\n@wakumo-ai please take a look\n</trigger_comment>"));
    }

    #[tokio::test]
    async fn test_review_event_skips_comment_fetch() {
        let github = FakeGithub::default();
        let payload: EventPayload = serde_json::from_value(serde_json::json!({
            "pull_request": { "number": 9, "user": { "login": "alice" } },
            "review": { "body": "@wakumo-ai check this", "user": { "login": "bob" } }
        }))
        .unwrap();

        let (result, prompts) = run_with(&make_config(), &payload, &github).await;

        result.unwrap();
        assert_eq!(github.list_calls.load(Ordering::SeqCst), 0);
        assert!(prompts[0].contains("No comments"));
    }

    #[tokio::test]
    async fn test_reply_contains_conversation_link() {
        let github = FakeGithub::default();
        let payload = issue_payload("Fix bug @wakumo-ai", "");

        let (result, _) = run_with(&make_config(), &payload, &github).await;

        result.unwrap();
        let posted = github.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert!(posted[0].contains("https://app.wakumo.ai/conversation/conv-42"));
    }

    #[tokio::test]
    async fn test_minimal_variant_reply_wording() {
        let github = FakeGithub::default();
        let payload = issue_payload("Fix bug @wakumo-ai", "");
        let mut config = make_config();
        config.variant = PromptVariant::Minimal;

        let (result, _) = run_with(&config, &payload, &github).await;

        result.unwrap();
        let posted = github.posted.lock().unwrap();
        assert!(posted[0].starts_with("Wakumo AI is looking into this."));
    }
}
