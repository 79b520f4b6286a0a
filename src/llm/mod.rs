pub mod openai;
pub mod prompts;

use anyhow::{Context, Result};

use crate::config::settings::LlmConfig;

/// Ask the completion service for per-speaker insights on a conversation.
///
/// The reply is split on blank-line boundaries, one entry per speaker
/// paragraph. The conversation text may be empty; it is sent as-is with no
/// retry and no length limiting.
pub async fn generate_insights(config: &LlmConfig, conversation_text: &str) -> Result<Vec<String>> {
    let api_key = config
        .openai_api_key
        .as_ref()
        .context("OpenAI API key not configured")?;

    let prompt = prompts::insight_prompt(conversation_text);

    tracing::debug!(
        chars = conversation_text.len(),
        model = %config.openai_model,
        "Requesting speaker insights"
    );

    let response = openai::complete(
        config.effective_base_url(),
        api_key,
        &config.openai_model,
        &prompt,
    )
    .await?;

    tracing::debug!(%response, "Completion response");

    Ok(split_insights(&response))
}

/// Split a completion reply into per-speaker insight strings on blank-line
/// boundaries. A reply with no blank line yields exactly one entry, the
/// trimmed reply.
pub fn split_insights(response: &str) -> Vec<String> {
    response
        .trim()
        .split("\n\n")
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        assert_eq!(split_insights("A\n\nB\n\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_without_separator_is_single_entry() {
        assert_eq!(
            split_insights("  one paragraph only \n"),
            vec!["one paragraph only"]
        );
    }

    #[test]
    fn test_split_trims_surrounding_whitespace() {
        assert_eq!(
            split_insights("\n\nSpeaker 0 is upbeat.\n\nSpeaker 1 is terse.\n\n"),
            vec!["Speaker 0 is upbeat.", "Speaker 1 is terse."]
        );
    }

    #[test]
    fn test_split_keeps_single_newlines_inside_entries() {
        let insights = split_insights("line one\nline two\n\nsecond entry");
        assert_eq!(insights, vec!["line one\nline two", "second entry"]);
    }
}
