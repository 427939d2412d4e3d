//! Tutor dialogue engine: answers the user grounded in retrieved context.
//!
//! ## Prompt
//!
//! System(rules + context) → bounded history window → User(input), assembled in one step by
//! [`prompt::assemble_tutor_messages`]. In [`HistoryMode::Parity`] the input also embeds the
//! plain-text transcript.
//!
//! Rule compliance (follow-up questions, staying in scope) is left to the model.

use std::sync::Arc;

use anyhow::Result;
use llm_client::LlmClient;
use memory_core::BoundedMemory;
use prompt::{assemble_tutor_messages, tutor_input, HistoryMode};
use tracing::{debug, info, instrument};

/// Tutor output for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorReply {
    /// Model reply shown to the user.
    pub text: String,
    /// The user-side text the model saw; recorded in the window as the request.
    pub memory_input: String,
}

/// Stage three of a turn: the tutor.
#[derive(Clone)]
pub struct TutorEngine {
    llm: Arc<dyn LlmClient>,
    mode: HistoryMode,
}

impl TutorEngine {
    pub fn new(llm: Arc<dyn LlmClient>, mode: HistoryMode) -> Self {
        Self { llm, mode }
    }

    /// Generates the tutor reply.
    ///
    /// # Arguments
    ///
    /// * `context` - Retrieved context, or the degraded error text
    /// * `user_input` - The user's new message
    /// * `rules` - Persona rules, prepended to `context` in the system message
    /// * `memory` - Window of recent exchanges, replayed as chat messages
    /// * `history_text` - Plain-text transcript (only sent in parity mode)
    #[instrument(skip_all, fields(model = %self.llm.model(), mode = self.mode.as_str(), window = memory.len()))]
    pub async fn respond(
        &self,
        context: &str,
        user_input: &str,
        rules: &str,
        memory: &BoundedMemory,
        history_text: &str,
    ) -> Result<TutorReply> {
        let window = memory.messages();
        let messages =
            assemble_tutor_messages(rules, context, &window, history_text, user_input, self.mode);
        debug!(
            message_count = messages.len(),
            context_len = context.len(),
            "Tutor prompt assembled"
        );

        let text = self.llm.get_llm_response_with_messages(messages).await?;
        info!(reply_len = text.len(), "Tutor replied");

        Ok(TutorReply {
            text,
            memory_input: tutor_input(self.mode, history_text, user_input),
        })
    }
}
