//! # Memory Core
//!
//! Conversation memory for one tutor session.
//!
//! ## Modules
//!
//! - [`types`] - Message, Role, Exchange
//! - [`transcript`] - TranscriptStore (full ordered history, seed greeting first)
//! - [`window`] - BoundedMemory (last *k* exchanges, used for prompting)

pub mod transcript;
pub mod types;
pub mod window;

pub use transcript::TranscriptStore;
pub use types::*;
pub use window::BoundedMemory;
