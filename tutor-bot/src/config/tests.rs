//! Config tests.

use crate::config::{BaseConfig, RetrievalConfig, TutorBotConfig, MAX_MEMORY_WINDOW};
use crate::session::Session;
use prompt::HistoryMode;
use serial_test::serial;
use std::env;
use std::io::Write;

const VARS: &[&str] = &[
    "API_KEY",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "LOG_FILE",
    "INTERPRETER_MODEL",
    "INTERPRETER_TEMPERATURE",
    "KEYWORD_FILTER",
    "TUTOR_MODEL",
    "TUTOR_TEMPERATURE",
    "TUTOR_MAX_TOKENS",
    "TUTOR_RULES_FILE",
    "HISTORY_MODE",
    "MEMORY_WINDOW",
    "SEED_GREETING",
    "RETRIEVAL_URL",
    "RETRIEVAL_TIMEOUT_SECS",
    "LLM_TIMEOUT_SECS",
    "THINKING_MESSAGE",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("API_KEY", "test_key");

    let config = TutorBotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.base.api_key, "test_key");
    assert_eq!(config.base.base_url, "https://api.openai.com/v1");
    assert_eq!(config.log_file(), "logs/tutor-bot.log");
    assert_eq!(config.llm_timeout().as_secs(), 120);
    assert_eq!(config.thinking_message(), "typing...");
    assert_eq!(config.interpreter.model, "gpt-3.5-turbo");
    assert_eq!(config.interpreter.temperature, 0.0);
    assert!(config.interpreter.keyword_filter);
    assert_eq!(config.tutor.model, "gpt-4-0613");
    assert_eq!(config.tutor.max_tokens, 2048);
    assert_eq!(config.tutor.history_mode, HistoryMode::Structured);
    assert_eq!(config.tutor.memory_window, 10);
    assert_eq!(config.tutor.seed_greeting, "How can I assist you?");
    assert!(config.tutor.rules_file.is_none());
    assert_eq!(config.tutor.load_rules().unwrap(), prompt::TUTOR_RULES);
    assert_eq!(
        config.retrieval.url,
        "https://customplugin.customplugin.ai/query"
    );
    assert_eq!(config.retrieval_timeout().as_secs(), 30);

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "fallback_key");
    env::set_var("INTERPRETER_MODEL", "gpt-4o-mini");
    env::set_var("KEYWORD_FILTER", "off");
    env::set_var("TUTOR_MAX_TOKENS", "512");
    env::set_var("HISTORY_MODE", "Parity");
    env::set_var("MEMORY_WINDOW", "2");
    env::set_var("SEED_GREETING", "Hi, How are you doing today?");
    env::set_var("RETRIEVAL_URL", "http://localhost:8080/query");
    env::set_var("RETRIEVAL_TIMEOUT_SECS", "5");
    env::set_var("LLM_TIMEOUT_SECS", "not-a-number");

    let config = TutorBotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.base.api_key, "fallback_key");
    assert_eq!(config.interpreter.model, "gpt-4o-mini");
    assert!(!config.interpreter.keyword_filter);
    assert_eq!(config.tutor.max_tokens, 512);
    assert_eq!(config.tutor.history_mode, HistoryMode::Parity);
    assert_eq!(config.tutor.memory_window, 2);
    assert_eq!(config.tutor.seed_greeting, "Hi, How are you doing today?");
    assert_eq!(config.retrieval.url, "http://localhost:8080/query");
    assert_eq!(config.retrieval_timeout().as_secs(), 5);
    // Unparsable numbers fall back to the default.
    assert_eq!(config.llm_timeout().as_secs(), 120);

    clear_env();
}

#[test]
#[serial]
fn test_api_key_argument_overrides_env() {
    clear_env();
    env::set_var("OPENAI_BASE_URL", "http://localhost:11434/v1");

    let config = TutorBotConfig::load(Some("cli_key".to_string())).unwrap();
    assert_eq!(config.base.api_key, "cli_key");
    assert_eq!(config.base.base_url, "http://localhost:11434/v1");

    clear_env();
}

#[test]
#[serial]
fn test_missing_api_key_fails() {
    clear_env();
    assert!(TutorBotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_unknown_history_mode_fails() {
    clear_env();
    env::set_var("API_KEY", "k");
    env::set_var("HISTORY_MODE", "both");

    let err = TutorBotConfig::load(None).unwrap_err();
    assert!(err.to_string().contains("HISTORY_MODE"));

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_values() {
    clear_env();
    env::set_var("API_KEY", "k");

    env::set_var("RETRIEVAL_URL", "not a url");
    let config = TutorBotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    env::remove_var("RETRIEVAL_URL");

    env::set_var("TUTOR_TEMPERATURE", "3.5");
    let config = TutorBotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    env::remove_var("TUTOR_TEMPERATURE");

    env::set_var("TUTOR_RULES_FILE", "/nonexistent/rules.txt");
    let config = TutorBotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_rules_file_replaces_builtin_rules() {
    clear_env();
    env::set_var("API_KEY", "k");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "You are a chemistry tutor.").unwrap();
    env::set_var("TUTOR_RULES_FILE", file.path());

    let config = TutorBotConfig::load(None).unwrap();
    config.validate().unwrap();
    assert_eq!(config.tutor.load_rules().unwrap(), "You are a chemistry tutor.\n");

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_oversized_memory_window() {
    clear_env();
    env::set_var("API_KEY", "k");
    env::set_var("MEMORY_WINDOW", "18446744073709551615");

    let config = TutorBotConfig::load(None).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("MEMORY_WINDOW"));
    // Even an unvalidated window never preallocates.
    let session = Session::new("hi", config.tutor.memory_window);
    assert!(session.memory().is_empty());

    env::set_var("MEMORY_WINDOW", MAX_MEMORY_WINDOW.to_string());
    let config = TutorBotConfig::load(None).unwrap();
    config.validate().unwrap();

    clear_env();
}

#[test]
#[serial]
fn test_retrieval_config_needs_no_api_key() {
    clear_env();
    env::set_var("RETRIEVAL_URL", "http://localhost:8080/query");
    env::set_var("LOG_FILE", "logs/retrieve.log");

    let retrieval = RetrievalConfig::from_env();
    retrieval.validate().unwrap();
    assert!(retrieval.build_retriever().is_ok());
    assert_eq!(BaseConfig::log_file_from_env(), "logs/retrieve.log");

    env::set_var("RETRIEVAL_TIMEOUT_SECS", "0");
    assert!(RetrievalConfig::from_env().validate().is_err());

    clear_env();
}
