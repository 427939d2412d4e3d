//! Tutor configuration: BaseConfig (provider + log + runtime) + stage configs (interpreter, tutor, retrieval).

mod base;
mod bot_config;
mod stages;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::TutorBotConfig;
pub use stages::{InterpreterConfig, RetrievalConfig, TutorConfig, MAX_MEMORY_WINDOW};

use std::env;
use std::str::FromStr;

/// Reads `key` and parses it; unset, blank or unparsable values fall back to `default`.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads `key` as a string, falling back to `default` when unset or blank.
fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads a boolean flag: `1/true/yes/on` or `0/false/no/off`, otherwise `default`.
fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key).map(|s| s.trim().to_lowercase()).as_deref() {
        Ok("1") | Ok("true") | Ok("yes") | Ok("on") => true,
        Ok("0") | Ok("false") | Ok("no") | Ok("off") => false,
        _ => default,
    }
}
