//! Wire event types for the streaming chat endpoint.

use serde::{Deserialize, Serialize};

/// One decoded event from the streaming response body.
///
/// The wire shape is a JSON object with a required `type` tag:
/// `{"type":"start"}`, `{"type":"chunk","content":"..."}`, `{"type":"end"}`
/// or `{"type":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatStreamEvent {
    /// Generation began; the UI may show a typing affordance.
    Start,

    /// A text delta. `content` is appended to the accumulating reply.
    Chunk {
        /// The new text fragment.
        content: String,
    },

    /// Generation finished successfully.
    End,

    /// The server aborted the stream.
    Error {
        /// Failure description. Some backends use the key `message`.
        #[serde(alias = "message")]
        error: String,
    },
}

impl ChatStreamEvent {
    /// Whether this event ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End | Self::Error { .. })
    }
}
