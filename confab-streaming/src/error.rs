//! Streaming errors.

use thiserror::Error;

/// Errors that can occur while consuming a chat stream.
///
/// Malformed individual lines are not errors; the decoder skips them and
/// keeps reading. These variants all terminate the read loop.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The server emitted an explicit `error` event.
    #[error("Server error: {0}")]
    Server(String),

    /// Reading the response body failed (connection drop, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The decoder's line buffer exceeded its cap.
    #[error("Stream buffer limit exceeded")]
    BufferOverflow,
}

impl StreamError {
    /// Wrap any displayable error as a transport failure.
    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Whether the failure was reported by the server itself.
    #[must_use]
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server(_))
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
