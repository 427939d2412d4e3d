//! Base config: provider connection, logging, per-call limits and REPL text. Loaded from env.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{env_parse, env_string};
use crate::core::TutorBotError;

/// Base config shared by both model stages and the REPL.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// API_KEY or OPENAI_API_KEY
    pub api_key: String,
    /// OPENAI_BASE_URL
    pub base_url: String,
    /// Log file path
    pub log_file: String,
    /// Upper bound (sec) for one chat-completion call
    pub llm_timeout_secs: u64,
    /// Shown by the REPL while a turn runs
    pub thinking_message: String,
}

impl BaseConfig {
    /// Load from environment variables. `api_key` overrides API_KEY if provided.
    pub fn load(api_key: Option<String>) -> Result<Self> {
        let (api_key, base_url) = match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => (
                key,
                env_string("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            ),
            None => {
                let llm = EnvLlmConfig::from_env()?;
                (llm.api_key().to_string(), llm.base_url().to_string())
            }
        };
        let log_file = Self::log_file_from_env();
        let llm_timeout_secs = env_parse("LLM_TIMEOUT_SECS", 120);
        let thinking_message = env_string("THINKING_MESSAGE", "typing...");

        Ok(Self {
            api_key,
            base_url,
            log_file,
            llm_timeout_secs,
            thinking_message,
        })
    }

    /// LOG_FILE, for commands that need logging but no provider key.
    pub fn log_file_from_env() -> String {
        env_string("LOG_FILE", "logs/tutor-bot.log")
    }

    /// Validate config (base URL must parse, timeout must be positive).
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(TutorBotError::Config(format!(
                "OPENAI_BASE_URL is not a valid URL: {}",
                self.base_url
            ))
            .into());
        }
        if self.llm_timeout_secs == 0 {
            return Err(TutorBotError::Config("LLM_TIMEOUT_SECS must be > 0".into()).into());
        }
        Ok(())
    }
}
