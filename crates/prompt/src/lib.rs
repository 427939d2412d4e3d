//! # Prompt
//!
//! Assembles the chat-completion payloads for both stages of the tutor pipeline.
//!
//! ## Layouts
//!
//! - **Interpreter**: replayed transcript (role-tagged) → System(extraction task) →
//!   User(instruction template with the new message).
//! - **Tutor**: System(rules + retrieved context) → bounded history window → User(input),
//!   where the input is either the raw query or the legacy "Context / Query" block
//!   (see [`HistoryMode`]).
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to OpenAI-compatible chat completion APIs.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// System instruction for the interpreter (keyword extraction) stage.
pub const INTERPRETER_SYSTEM_MESSAGE: &str = "You are an interpreter to a conversation between user and assistant. Provided is the conversation between both. Your job is to understand the intent of the user while he is asking question and provide relevant semantically related keywords. ";

/// Human instruction template for the interpreter; `{userMessage}` is replaced by the new message.
pub const INTERPRETER_HUMAN_TEMPLATE: &str = "Now, your job as an assistant is to interpret the entire conversation, and understand the intent of the conversation and the question and then provide the semantically relevant keywords to query the database which are more relevant to the question. Ensure to provide ONLY the keywords in your response. The question is \"{userMessage}\"";

/// Placeholder in [`INTERPRETER_HUMAN_TEMPLATE`].
pub const USER_MESSAGE_PLACEHOLDER: &str = "{userMessage}";

/// Persona and behavior rules for the tutor stage. The retrieved context is appended directly after.
pub const TUTOR_RULES: &str = r#"

    You are an AI tutor and your expertise is based on the data provided. The user is someone who wants a deeper understanding
    of the data.

    Rules:
    1. Being an AI tutor, your tone should be conversational, and not like a conventional Q&A bot.
    2. Always you need to answer in 1st person.
    3. The inital response that you generate needs to have 3 additional questions at the end in the form of a numbered bulleted list,
    to keep the conversation with the user and to ensure that the user has choice.
    4. For every further response, you need to include 1 follow up topic in a conversational tone, based on the response you provided,
    to keep the conversation flowing.
    5. If the user is unwilling to go ahead with the follow up topic or if he is confused, acknowledge it and provide 3 additional questions
    for the user to choose, from the content provided.
    6. You need to ensure that every response and question is only from the content provided. Do not use outside knowledge and don't let
    your responses be open-ended.
    7. If the user asks anything that is beyond the scope of the data provided below, let the user know in your response that the question
    is out of scope.

    "#;

/// How conversation history reaches the tutor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// History only as the structured window; the last User message is the raw query.
    #[default]
    Structured,
    /// Window plus the plain-text transcript embedded in the last User message.
    Parity,
}

impl HistoryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryMode::Structured => "structured",
            HistoryMode::Parity => "parity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "structured" => Some(HistoryMode::Structured),
            "parity" => Some(HistoryMode::Parity),
            _ => None,
        }
    }
}

/// Fills [`INTERPRETER_HUMAN_TEMPLATE`] with the user's message.
pub fn interpreter_instruction(user_message: &str) -> String {
    INTERPRETER_HUMAN_TEMPLATE.replace(USER_MESSAGE_PLACEHOLDER, user_message)
}

/// Builds the interpreter request: prior messages in order, then the system task, then the instruction.
///
/// `System` entries in `previous` are passed through unchanged.
pub fn assemble_interpreter_messages(previous: &[ChatMessage], user_message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(previous.len() + 2);
    messages.extend(previous.iter().cloned());
    messages.push(ChatMessage::system(INTERPRETER_SYSTEM_MESSAGE));
    messages.push(ChatMessage::user(interpreter_instruction(user_message)));
    messages
}

/// The legacy human turn: plain-text transcript followed by the query.
pub fn parity_input(history_text: &str, query: &str) -> String {
    format!("Context:\n {} \n\n Query:\n{}", history_text, query)
}

/// The text that goes into the final User message for the given mode.
pub fn tutor_input(mode: HistoryMode, history_text: &str, query: &str) -> String {
    match mode {
        HistoryMode::Structured => query.to_string(),
        HistoryMode::Parity => parity_input(history_text, query),
    }
}

/// Builds the tutor request.
///
/// # Order
///
/// System(`rules` + `context`) → `window` (as given) → User([`tutor_input`]).
///
/// # Arguments
///
/// * `rules` - Persona/behavior rules (usually [`TUTOR_RULES`])
/// * `context` - Retrieved context text (or a degraded error string)
/// * `window` - Bounded history, already in chronological order
/// * `history_text` - Plain-text transcript, only used in [`HistoryMode::Parity`]
/// * `query` - The user's new message
pub fn assemble_tutor_messages(
    rules: &str,
    context: &str,
    window: &[ChatMessage],
    history_text: &str,
    query: &str,
    mode: HistoryMode,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(window.len() + 2);
    messages.push(ChatMessage::system(format!("{}{}", rules, context)));
    messages.extend(window.iter().cloned());
    messages.push(ChatMessage::user(tutor_input(mode, history_text, query)));
    messages
}
