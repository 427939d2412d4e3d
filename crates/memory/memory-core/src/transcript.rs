//! # Transcript Store
//!
//! Full ordered history of one session: a seed assistant greeting followed by every
//! completed exchange. Grows monotonically; nothing is reordered or removed until the
//! store is dropped at session end.

use crate::types::{Exchange, Message};

/// Ordered request/response history of one session.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    greeting: String,
    exchanges: Vec<Exchange>,
}

impl TranscriptStore {
    /// Creates a store holding only the seed greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            exchanges: Vec::new(),
        }
    }

    /// Appends one completed exchange.
    pub fn append(&mut self, request: impl Into<String>, response: impl Into<String>) {
        self.exchanges.push(Exchange::new(request, response));
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Number of completed exchanges (the greeting is not counted).
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Rows for display, in order: `(None, greeting)` then `(Some(request), response)`.
    pub fn render_transcript(&self) -> Vec<(Option<&str>, &str)> {
        std::iter::once((None, self.greeting.as_str()))
            .chain(
                self.exchanges
                    .iter()
                    .map(|e| (Some(e.request.as_str()), e.response.as_str())),
            )
            .collect()
    }

    /// Plain-text history: one `"Human: {request}\nBot: {response}\n"` block per exchange.
    ///
    /// Request *i* is paired with response *i*; the greeting is not part of the text.
    pub fn reconstruct_history_text(&self) -> String {
        let mut out = String::new();
        for exchange in &self.exchanges {
            out.push_str("Human: ");
            out.push_str(&exchange.request);
            out.push('\n');
            out.push_str("Bot: ");
            out.push_str(&exchange.response);
            out.push('\n');
        }
        out
    }

    /// Every message in chronological order, greeting first.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(1 + self.exchanges.len() * 2);
        messages.push(Message::assistant(self.greeting.clone()));
        for exchange in &self.exchanges {
            messages.extend(exchange.messages());
        }
        messages
    }
}
