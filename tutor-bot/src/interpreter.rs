//! Keyword interpreter: turns the conversation plus a new message into a short search query.
//!
//! ## Prompt
//!
//! Replayed transcript → System(extraction task) → User(instruction with the new message),
//! built by [`prompt::assemble_interpreter_messages`].
//!
//! ## Post-filter
//!
//! The reply is collapsed to one line. With the filter on, tokens whose alphanumeric length is
//! two or less are dropped; if that removes everything, the single-line reply is kept instead.

use std::sync::Arc;

use anyhow::{bail, Result};
use llm_client::LlmClient;
use memory_core::Message;
use prompt::{assemble_interpreter_messages, ChatMessage};
use tracing::{debug, info, instrument};

/// Stage one of a turn: keyword extraction.
#[derive(Clone)]
pub struct KeywordExtractor {
    llm: Arc<dyn LlmClient>,
    filter: bool,
}

impl KeywordExtractor {
    pub fn new(llm: Arc<dyn LlmClient>, filter: bool) -> Self {
        Self { llm, filter }
    }

    /// Asks the interpreter model for keywords describing `new_message` in the context of `transcript`.
    ///
    /// The whole transcript is replayed; nothing is truncated.
    ///
    /// # Errors
    ///
    /// Provider failures propagate. A blank reply is an error as well.
    #[instrument(skip_all, fields(model = %self.llm.model(), transcript_len = transcript.len()))]
    pub async fn extract(&self, transcript: &[Message], new_message: &str) -> Result<String> {
        let previous: Vec<ChatMessage> = transcript.iter().map(Message::to_chat_message).collect();
        let messages = assemble_interpreter_messages(&previous, new_message);
        debug!(message_count = messages.len(), "Interpreter prompt assembled");

        let reply = self.llm.get_llm_response_with_messages(messages).await?;
        let keywords = if self.filter {
            filter_keywords(&reply)
        } else {
            single_line(&reply)
        };
        if keywords.is_empty() {
            bail!("Interpreter returned an empty reply");
        }

        info!(keywords = %keywords, "Keywords extracted");
        Ok(keywords)
    }
}

/// Collapses all whitespace runs (newlines included) to single spaces and trims.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops short tokens from a single-line reply.
pub fn filter_keywords(text: &str) -> String {
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.chars().filter(|c| c.is_alphanumeric()).count() > 2)
        .collect();
    if kept.is_empty() {
        return single_line(text);
    }
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_collapses_newlines() {
        assert_eq!(single_line("  chlorophyll,\n light reactions \n"), "chlorophyll, light reactions");
    }

    #[test]
    fn filter_drops_short_tokens() {
        assert_eq!(
            filter_keywords("Keywords: role of chlorophyll in photosynthesis, C3 vs C4"),
            "Keywords: role chlorophyll photosynthesis,"
        );
    }

    #[test]
    fn filter_counts_only_alphanumerics() {
        assert_eq!(filter_keywords("- a, ok!! water"), "water");
    }

    #[test]
    fn filter_falls_back_when_everything_is_short() {
        assert_eq!(filter_keywords(" C3\nC4 "), "C3 C4");
    }

    #[test]
    fn filter_of_blank_is_blank() {
        assert_eq!(filter_keywords(" \n "), "");
    }
}
