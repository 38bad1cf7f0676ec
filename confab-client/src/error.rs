//! API client errors.

use confab_streaming::StreamError;
use thiserror::Error;

/// Errors produced by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself failed (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the credentials (401).
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// The resource does not exist or is not accessible (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests (429).
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message, extracted from the response body when present.
        message: String,
    },

    /// The streaming read loop failed after the response began.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The configured base URL does not parse.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Chat messages must contain non-whitespace text.
    #[error("Message must not be empty")]
    EmptyMessage,
}

impl ApiError {
    /// Whether retrying the same call could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited(_) => true,
            Self::Stream(err) => !err.is_server(),
            _ => false,
        }
    }
}
