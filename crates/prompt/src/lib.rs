//! Prompt construction for the Wakumo AI action.
//!
//! [`build_prompt`] is a pure function from issue context and operator
//! options to the final prompt string. Two override modes: a non-blank
//! `system_prompt` replaces the default template entirely, and a non-blank
//! `append_system_prompt` is appended to whatever was produced, on either
//! path.

use wakumo_action_core::{IssueComment, IssueContext, PromptOptions, PromptVariant, TRIGGER_TAG};

mod templates;

pub use templates::{MINIMAL_INSTRUCTIONS, PREAMBLE, STANDARD_INSTRUCTIONS};

/// Base URL of the Wakumo conversation UI, for reply links.
pub const CONVERSATION_BASE_URL: &str = "https://app.wakumo.ai/conversation";

/// Build the final prompt for a run.
pub fn build_prompt(context: &IssueContext, options: &PromptOptions) -> String {
    let mut prompt = match &options.system_prompt {
        Some(system) if !system.trim().is_empty() => system.clone(),
        _ => default_prompt(context, options.variant),
    };

    if let Some(append) = &options.append_system_prompt
        && !append.trim().is_empty()
    {
        prompt.push_str("\n\n");
        prompt.push_str(append);
    }

    prompt
}

/// Render the default template: preamble, issue info, body, comments,
/// optional trigger comment, then the variant's instruction section.
fn default_prompt(context: &IssueContext, variant: PromptVariant) -> String {
    let mut prompt = String::new();

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n<issue_info>\n");
    prompt.push_str(&format!(
        "Repository: {}/{}\n",
        context.owner, context.repo
    ));
    prompt.push_str(&format!("Issue: #{}\n", context.issue_number));
    prompt.push_str(&format!("Title: {}\n", context.title));
    prompt.push_str(&format!("Author: {}\n", context.author));
    prompt.push_str("</issue_info>\n\n");

    prompt.push_str("<issue_body>\n");
    prompt.push_str(&context.body);
    prompt.push_str("\n</issue_body>\n\n");

    prompt.push_str("<comments>\n");
    prompt.push_str(&format_comments(&context.comments));
    prompt.push_str("\n</comments>\n\n");

    if let Some(trigger) = &context.trigger_comment {
        prompt.push_str("<trigger_comment>\n");
        prompt.push_str(trigger);
        prompt.push_str("\n</trigger_comment>\n\n");
    }

    prompt.push_str("<event_type>ISSUE_CREATED</event_type>\n");
    prompt.push_str(&format!(
        "<trigger_context>new issue with '{TRIGGER_TAG}' in body or comment</trigger_context>\n\n"
    ));

    let instructions = match variant {
        PromptVariant::Standard => STANDARD_INSTRUCTIONS,
        PromptVariant::Minimal => MINIMAL_INSTRUCTIONS,
    };
    prompt.push_str(
        &instructions
            .replace("{OWNER}", &context.owner)
            .replace("{REPO}", &context.repo),
    );

    prompt
}

/// Render the comments block: one entry per comment, blank-line separated.
fn format_comments(comments: &[IssueComment]) -> String {
    if comments.is_empty() {
        return "No comments".into();
    }

    comments
        .iter()
        .map(|c| format!("- [{} at {}]:\n{}", c.user, c.created_at_str(), c.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Link to a created conversation.
pub fn conversation_link(conversation_id: &str) -> String {
    format!("{CONVERSATION_BASE_URL}/{conversation_id}")
}

/// Reply comment posted back on the issue/PR, per variant.
pub fn reply_message(variant: PromptVariant, conversation_id: &str) -> String {
    let link = conversation_link(conversation_id);
    match variant {
        PromptVariant::Standard => {
            format!("Wakumo AI conversation created: {link}")
        }
        PromptVariant::Minimal => {
            format!("Wakumo AI is looking into this. Follow along: {link}")
        }
    }
}
