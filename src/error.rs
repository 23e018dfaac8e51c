//! Error types for the video acquisition layer
//!
//! Failures here never reach an HTTP client: the pipeline turns every
//! `SourceError` into an empty contribution and logs it.

use thiserror::Error;

/// Failures while talking to the external video index
#[derive(Error, Debug)]
pub enum SourceError {
    /// No API key configured
    #[error("no API credential configured")]
    MissingCredential,

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status (quota, bad key, ...)
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl SourceError {
    /// HTTP status associated with the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Api { status, .. } => Some(*status),
            SourceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
