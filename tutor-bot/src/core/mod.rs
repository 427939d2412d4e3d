//! Core: error types and logging setup.

pub mod error;
pub mod logger;

pub use error::{Stage, TurnError, TutorBotError};
pub use logger::init_tracing;
