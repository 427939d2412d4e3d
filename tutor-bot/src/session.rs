//! One conversation: the full transcript plus the bounded prompt window.
//!
//! Created with [`Session::new`] and torn down with [`Session::end`]; nothing outlives it.

use chrono::{DateTime, Local};
use memory_core::{BoundedMemory, Exchange, TranscriptStore};
use tracing::info;

/// Summary returned when a session ends.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub exchanges: usize,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
}

impl SessionSummary {
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at - self.started_at
    }
}

/// Conversation state for one user.
#[derive(Debug)]
pub struct Session {
    transcript: TranscriptStore,
    memory: BoundedMemory,
    last_keywords: Option<String>,
    started_at: DateTime<Local>,
}

impl Session {
    /// Starts a session seeded with `greeting` and a window of `memory_window` exchanges.
    pub fn new(greeting: impl Into<String>, memory_window: usize) -> Self {
        let transcript = TranscriptStore::new(greeting);
        info!(memory_window, "Session started");
        Self {
            transcript,
            memory: BoundedMemory::new(memory_window),
            last_keywords: None,
            started_at: Local::now(),
        }
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn memory(&self) -> &BoundedMemory {
        &self.memory
    }

    /// Keywords of the last completed turn.
    pub fn last_keywords(&self) -> Option<&str> {
        self.last_keywords.as_deref()
    }

    /// Records a completed turn.
    ///
    /// The transcript keeps what the user typed; the window keeps `memory_input`, which is what
    /// the tutor model actually saw.
    pub fn record_turn(
        &mut self,
        user_input: &str,
        memory_input: &str,
        response: &str,
        keywords: &str,
    ) {
        self.transcript.append(user_input, response);
        self.memory.push(Exchange::new(memory_input, response));
        self.last_keywords = Some(keywords.to_string());
    }

    /// Ends the session, dropping all history.
    pub fn end(self) -> SessionSummary {
        let summary = SessionSummary {
            exchanges: self.transcript.len(),
            started_at: self.started_at,
            ended_at: Local::now(),
        };
        info!(
            exchanges = summary.exchanges,
            duration_secs = summary.duration().num_seconds(),
            "Session ended"
        );
        summary
    }
}
