//! Error types for the text assistant.

use thiserror::Error;

/// Failures of a [`TextAssistant`](super::TextAssistant) backend.
///
/// These never leave the [`Assistant`](super::Assistant) facade, which maps
/// each of them to a fixed fallback.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No API key configured; no request was attempted.
    #[error("API credential missing")]
    MissingCredential,

    /// The request could not be sent or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply did not have the expected shape.
    #[error("Malformed reply: {0}")]
    Malformed(String),

    /// The reply carried no text.
    #[error("Empty reply")]
    EmptyResponse,
}
