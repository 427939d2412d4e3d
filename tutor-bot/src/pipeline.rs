//! Turn pipeline: interpreter → retrieval → tutor, strictly in sequence.
//!
//! ## Failure handling
//!
//! - interpreter or tutor failure, timeout or cancellation: the turn fails and the session is
//!   left untouched
//! - retrieval failure: the error text becomes the context and the turn continues
//!
//! Every model call is bounded by `llm_timeout`; the retrieval client carries its own timeout.
//! One [`CancellationToken`] covers the whole turn.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use llm_client::{CompletionOptions, LlmClient, OpenAILlmClient};
use retrieval::ContextRetriever;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::config::TutorBotConfig;
use crate::core::{Stage, TurnError};
use crate::interpreter::KeywordExtractor;
use crate::session::Session;
use crate::tutor::TutorEngine;

/// What one successful turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub keywords: String,
    /// Retrieved context, or the retrieval error text when `degraded`.
    pub context: String,
    pub degraded: bool,
    pub reply: String,
}

/// The three stages wired together.
#[derive(Clone)]
pub struct TurnPipeline {
    extractor: KeywordExtractor,
    retriever: ContextRetriever,
    tutor: TutorEngine,
    rules: String,
    llm_timeout: Duration,
}

impl TurnPipeline {
    pub fn new(
        extractor: KeywordExtractor,
        retriever: ContextRetriever,
        tutor: TutorEngine,
        rules: impl Into<String>,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            retriever,
            tutor,
            rules: rules.into(),
            llm_timeout,
        }
    }

    /// Builds the production pipeline: two OpenAI clients (interpreter, tutor) and the HTTP retriever.
    pub fn from_config(config: &TutorBotConfig) -> Result<Self> {
        let base = &config.base;
        let interpreter_llm = OpenAILlmClient::with_base_url(base.api_key.clone(), base.base_url.clone())
            .with_model(config.interpreter.model.clone())
            .with_options(
                CompletionOptions::default().with_temperature(config.interpreter.temperature),
            );
        let tutor_llm = OpenAILlmClient::with_base_url(base.api_key.clone(), base.base_url.clone())
            .with_model(config.tutor.model.clone())
            .with_options(
                CompletionOptions::default()
                    .with_temperature(config.tutor.temperature)
                    .with_max_tokens(config.tutor.max_tokens),
            );

        let retriever = config.retrieval.build_retriever()?;
        let rules = config.tutor.load_rules()?;

        Ok(Self::new(
            KeywordExtractor::new(Arc::new(interpreter_llm), config.interpreter.keyword_filter),
            retriever,
            TutorEngine::new(Arc::new(tutor_llm), config.tutor.history_mode),
            rules,
            config.llm_timeout(),
        ))
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Runs one turn for `user_input` and records it in `session` on success.
    #[instrument(skip(self, session, cancel), fields(turn = session.transcript().len() + 1))]
    pub async fn run_turn(
        &self,
        session: &mut Session,
        user_input: &str,
        cancel: &CancellationToken,
    ) -> Result<TurnOutcome, TurnError> {
        let input = user_input.trim();
        if input.is_empty() {
            return Err(TurnError::EmptyInput);
        }
        info!(input_len = input.len(), "Turn started");

        let transcript = session.transcript().messages();
        let keywords = self
            .guarded(
                Stage::Interpreter,
                cancel,
                self.extractor.extract(&transcript, input),
            )
            .await?;

        let (context, degraded) = tokio::select! {
            _ = cancel.cancelled() => {
                warn!("Turn cancelled during retrieval");
                return Err(TurnError::Cancelled);
            }
            result = self.retriever.retrieve(&keywords) => match result {
                Ok(r) => (r.context_text, false),
                Err(e) => {
                    warn!(error = %e, "Retrieval failed, continuing with degraded context");
                    (e.to_string(), true)
                }
            },
        };

        let history_text = session.transcript().reconstruct_history_text();
        let reply = self
            .guarded(
                Stage::Tutor,
                cancel,
                self.tutor
                    .respond(&context, input, &self.rules, session.memory(), &history_text),
            )
            .await?;

        session.record_turn(input, &reply.memory_input, &reply.text, &keywords);
        info!(degraded, "Turn completed");

        Ok(TurnOutcome {
            keywords,
            context,
            degraded,
            reply: reply.text,
        })
    }

    /// Awaits a model call under the per-call timeout, aborting early if the turn is cancelled.
    async fn guarded<T, F>(
        &self,
        stage: Stage,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<T, TurnError>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            _ = cancel.cancelled() => {
                warn!(%stage, "Turn cancelled");
                Err(TurnError::Cancelled)
            }
            result = tokio::time::timeout(self.llm_timeout, call) => match result {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => {
                    error!(%stage, error = %e, "Model call failed");
                    Err(TurnError::provider(stage, e))
                }
                Err(_) => {
                    error!(%stage, timeout_secs = self.llm_timeout.as_secs(), "Model call timed out");
                    Err(TurnError::Timeout {
                        stage,
                        secs: self.llm_timeout.as_secs(),
                    })
                }
            },
        }
    }
}
