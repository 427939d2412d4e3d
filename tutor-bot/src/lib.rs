//! # tutor-bot
//!
//! Two-stage retrieval-augmented tutor. Each user turn runs three stages in sequence:
//!
//! 1. [`interpreter`]: conversation + new message → search keywords (LLM)
//! 2. retrieval: keywords → grounding context (HTTP, `retrieval` crate)
//! 3. [`tutor`]: rules + context + bounded history + message → reply (LLM)
//!
//! [`session::Session`] owns the transcript and the history window; [`pipeline::TurnPipeline`]
//! runs a turn against it; [`repl`] is the terminal front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod interpreter;
pub mod pipeline;
pub mod repl;
pub mod session;
pub mod tutor;

pub use crate::config::TutorBotConfig;
pub use crate::core::{init_tracing, Stage, TurnError, TutorBotError};
pub use interpreter::KeywordExtractor;
pub use pipeline::{TurnOutcome, TurnPipeline};
pub use session::{Session, SessionSummary};
pub use tutor::{TutorEngine, TutorReply};
