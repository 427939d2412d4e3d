//! Per-stage config: interpreter (keywords), tutor (dialogue), retrieval (HTTP endpoint).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use prompt::HistoryMode;
use retrieval::ContextRetriever;

use super::{env_flag, env_parse, env_string};
use crate::core::TutorBotError;

/// Keyword interpreter settings.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// INTERPRETER_MODEL
    pub model: String,
    /// INTERPRETER_TEMPERATURE
    pub temperature: f32,
    /// KEYWORD_FILTER: drop tokens of two characters or fewer
    pub keyword_filter: bool,
}

impl InterpreterConfig {
    pub fn from_env() -> Self {
        Self {
            model: env_string("INTERPRETER_MODEL", "gpt-3.5-turbo"),
            temperature: env_parse("INTERPRETER_TEMPERATURE", 0.0),
            keyword_filter: env_flag("KEYWORD_FILTER", true),
        }
    }
}

/// Largest accepted MEMORY_WINDOW.
pub const MAX_MEMORY_WINDOW: usize = 1000;

/// Tutor dialogue settings.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// TUTOR_MODEL
    pub model: String,
    /// TUTOR_TEMPERATURE
    pub temperature: f32,
    /// TUTOR_MAX_TOKENS
    pub max_tokens: u32,
    /// TUTOR_RULES_FILE: replaces the built-in persona rules when set
    pub rules_file: Option<PathBuf>,
    /// HISTORY_MODE
    pub history_mode: HistoryMode,
    /// MEMORY_WINDOW: exchanges kept in the prompt window
    pub memory_window: usize,
    /// SEED_GREETING
    pub seed_greeting: String,
}

impl TutorConfig {
    pub fn from_env() -> Result<Self> {
        let history_mode = match std::env::var("HISTORY_MODE") {
            Ok(raw) if !raw.trim().is_empty() => HistoryMode::parse(&raw).ok_or_else(|| {
                TutorBotError::Config(format!(
                    "HISTORY_MODE must be 'structured' or 'parity', got: {}",
                    raw
                ))
            })?,
            _ => HistoryMode::default(),
        };
        let rules_file = std::env::var("TUTOR_RULES_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            model: env_string("TUTOR_MODEL", "gpt-4-0613"),
            temperature: env_parse("TUTOR_TEMPERATURE", 0.0),
            max_tokens: env_parse("TUTOR_MAX_TOKENS", 2048),
            rules_file,
            history_mode,
            memory_window: env_parse("MEMORY_WINDOW", 10),
            seed_greeting: env_string("SEED_GREETING", "How can I assist you?"),
        })
    }

    /// Persona rules: the rules file contents when configured, else the built-in text.
    pub fn load_rules(&self) -> Result<String> {
        match &self.rules_file {
            Some(path) => {
                let rules = std::fs::read_to_string(path).map_err(TutorBotError::Io)?;
                Ok(rules)
            }
            None => Ok(prompt::TUTOR_RULES.to_string()),
        }
    }
}

/// Retrieval endpoint settings.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// RETRIEVAL_URL
    pub url: String,
    /// RETRIEVAL_TIMEOUT_SECS
    pub timeout_secs: u64,
}

impl RetrievalConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_string("RETRIEVAL_URL", retrieval::DEFAULT_RETRIEVAL_URL),
            timeout_secs: env_parse("RETRIEVAL_TIMEOUT_SECS", 30),
        }
    }

    /// Validate config (URL must parse, timeout must be positive).
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.url).is_err() {
            return Err(TutorBotError::Config(format!(
                "RETRIEVAL_URL is not a valid URL: {}",
                self.url
            ))
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(
                TutorBotError::Config("RETRIEVAL_TIMEOUT_SECS must be > 0".into()).into(),
            );
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP retriever for the configured endpoint.
    pub fn build_retriever(&self) -> Result<ContextRetriever> {
        let retriever =
            ContextRetriever::new(self.url.clone(), self.timeout()).map_err(TutorBotError::from)?;
        Ok(retriever)
    }
}
