//! LLM provider configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Provider connection settings for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
}

/// Provider config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl EnvLlmConfig {
    /// Load from environment: `API_KEY` (or `OPENAI_API_KEY`), `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("API_KEY (or OPENAI_API_KEY) not set")?;
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        Ok(Self { api_key, base_url })
    }
}
