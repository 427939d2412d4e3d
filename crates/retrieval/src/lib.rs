//! # Retrieval
//!
//! Fetches grounding context for a set of keywords from a knowledge-base query endpoint.
//!
//! ## Wire format
//!
//! `POST {url}` with `Content-Type: application/json` and body `{"text": "<keywords>"}`.
//! A 200 response carries JSON with a `context` string; the useful part sits between
//! [`START_MARKER`] and [`END_MARKER`].
//!
//! ## Errors
//!
//! Every failure is a [`RetrievalError`] built from what is actually available: the status
//! code for non-200 responses, the transport error itself when no response exists.
//! Callers usually degrade the error to text with `to_string()` and carry on.

mod error;
mod extract;

pub use error::RetrievalError;
pub use extract::{extract_context, END_MARKER, START_MARKER};

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Default knowledge-base query endpoint.
pub const DEFAULT_RETRIEVAL_URL: &str = "https://customplugin.customplugin.ai/query";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Context text extracted from a successful retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalResult {
    pub context_text: String,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
}

/// Client for the retrieval endpoint. Cheap to clone; the inner HTTP client is shared.
#[derive(Debug, Clone)]
pub struct ContextRetriever {
    client: Client,
    url: String,
}

impl ContextRetriever {
    /// Creates a retriever for `url` with a per-request `timeout`. No retries are made.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RetrievalError::from_transport)?;
        Ok(Self::with_client(client, url))
    }

    fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Queries the endpoint with `keywords` and extracts the marked context.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::Status`] for any non-200 status
    /// - [`RetrievalError::Timeout`] / [`RetrievalError::Transport`] when no response arrived
    /// - [`RetrievalError::Decode`] when a 200 body is not JSON
    ///
    /// A 200 body without a string `context` field yields an empty context, not an error.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn retrieve(&self, keywords: &str) -> Result<RetrievalResult, RetrievalError> {
        info!(keywords_len = keywords.len(), "Retrieval request");

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&QueryRequest { text: keywords })
            .send()
            .await
            .map_err(RetrievalError::from_transport)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), "Retrieval returned non-200 status");
            return Err(RetrievalError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(RetrievalError::from_transport)?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| RetrievalError::Decode(e.to_string()))?;

        let raw = value
            .get("context")
            .and_then(|c| c.as_str())
            .unwrap_or_default();
        if raw.is_empty() {
            debug!("Retrieval response has no context field");
        }

        let context_text = extract_context(raw).to_string();
        info!(context_len = context_text.len(), "Retrieval completed");
        Ok(RetrievalResult { context_text })
    }
}
