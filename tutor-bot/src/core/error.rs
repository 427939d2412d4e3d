//! Error types for the tutor application.
//!
//! [`TutorBotError`] covers startup (config, IO, retrieval client); [`TurnError`] is one failed turn.

use std::fmt;

use thiserror::Error;

/// Top-level error for tutor-bot startup and non-turn operations.
#[derive(Error, Debug)]
pub enum TutorBotError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] retrieval::RetrievalError),
}

/// Model-backed pipeline stage, for error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Interpreter,
    Tutor,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Interpreter => "interpreter",
            Stage::Tutor => "tutor",
        };
        f.write_str(name)
    }
}

/// Why a turn produced no reply. The session is never modified when this is returned.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Interpreter failed: {0:#}")]
    Interpreter(anyhow::Error),

    #[error("Tutor failed: {0:#}")]
    Tutor(anyhow::Error),

    #[error("{stage} timed out after {secs}s")]
    Timeout { stage: Stage, secs: u64 },

    #[error("Turn cancelled")]
    Cancelled,
}

impl TurnError {
    /// Wraps a provider failure for the stage that produced it.
    pub fn provider(stage: Stage, err: anyhow::Error) -> Self {
        match stage {
            Stage::Tutor => TurnError::Tutor(err),
            Stage::Interpreter => TurnError::Interpreter(err),
        }
    }
}
