//! TutorBotConfig: BaseConfig + stage configs. Use load() for env-based loading.

use std::time::Duration;

use anyhow::Result;

use super::{BaseConfig, InterpreterConfig, RetrievalConfig, TutorConfig, MAX_MEMORY_WINDOW};
use crate::core::TutorBotError;

/// Full application config.
#[derive(Debug, Clone)]
pub struct TutorBotConfig {
    pub base: BaseConfig,
    pub interpreter: InterpreterConfig,
    pub tutor: TutorConfig,
    pub retrieval: RetrievalConfig,
}

impl TutorBotConfig {
    /// Load full config from environment variables. If `api_key` is provided it overrides API_KEY.
    /// Call validate() after load to check config before any network call.
    pub fn load(api_key: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(api_key)?;
        let interpreter = InterpreterConfig::from_env();
        let tutor = TutorConfig::from_env()?;
        let retrieval = RetrievalConfig::from_env();
        Ok(Self {
            base,
            interpreter,
            tutor,
            retrieval,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.retrieval.validate()?;
        if self.tutor.memory_window > MAX_MEMORY_WINDOW {
            return Err(TutorBotError::Config(format!(
                "MEMORY_WINDOW must be at most {}, got {}",
                MAX_MEMORY_WINDOW, self.tutor.memory_window
            ))
            .into());
        }
        if self.tutor.max_tokens == 0 {
            return Err(TutorBotError::Config("TUTOR_MAX_TOKENS must be > 0".into()).into());
        }
        for (name, t) in [
            ("INTERPRETER_TEMPERATURE", self.interpreter.temperature),
            ("TUTOR_TEMPERATURE", self.tutor.temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(TutorBotError::Config(format!(
                    "{} must be within 0.0..=2.0, got {}",
                    name, t
                ))
                .into());
            }
        }
        if let Some(path) = &self.tutor.rules_file {
            if !path.is_file() {
                return Err(TutorBotError::Config(format!(
                    "TUTOR_RULES_FILE does not exist: {}",
                    path.display()
                ))
                .into());
            }
        }
        Ok(())
    }

    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.base.llm_timeout_secs)
    }
    pub fn retrieval_timeout(&self) -> Duration {
        self.retrieval.timeout()
    }
    pub fn thinking_message(&self) -> &str {
        &self.base.thinking_message
    }
}
