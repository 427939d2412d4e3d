//! Retrieval error type.

use thiserror::Error;

/// Why a retrieval produced no context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// Endpoint answered with a status other than 200.
    #[error("Request failed with status code: {0}")]
    Status(u16),

    /// No response within the configured timeout.
    #[error("Request failed: timed out")]
    Timeout,

    /// Request could not be sent or the body could not be read.
    #[error("Request failed ({kind}): {message}")]
    Transport { kind: String, message: String },

    /// A 200 body that is not valid JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl RetrievalError {
    /// Classifies a transport error using only the error value itself.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return RetrievalError::Timeout;
        }
        let kind = if err.is_builder() {
            "builder"
        } else if err.is_connect() {
            "connect"
        } else if err.is_redirect() {
            "redirect"
        } else if err.is_body() {
            "body"
        } else if err.is_decode() {
            "decode"
        } else if err.is_request() {
            "request"
        } else {
            "unknown"
        };
        RetrievalError::Transport {
            kind: kind.to_string(),
            message: err.to_string(),
        }
    }
}
