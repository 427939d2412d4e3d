//! # Core Types
//!
//! ## Role
//!
//! Who produced a message: the human (`User`) or a model (`Assistant`).
//!
//! ## Message
//!
//! One immutable utterance with its role.
//!
//! ## Exchange
//!
//! One completed turn: the user's request and the assistant's response.

use chrono::{DateTime, Utc};
use prompt::ChatMessage;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Same message in the prompt crate's wire shape.
    pub fn to_chat_message(&self) -> ChatMessage {
        match self.role {
            Role::User => ChatMessage::user(self.content.clone()),
            Role::Assistant => ChatMessage::assistant(self.content.clone()),
        }
    }
}

/// One request/response pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub request: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    pub fn new(request: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }

    /// The exchange as two messages: user then assistant.
    pub fn messages(&self) -> [Message; 2] {
        [
            Message::user(self.request.clone()),
            Message::assistant(self.response.clone()),
        ]
    }
}
