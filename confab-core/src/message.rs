//! Chat history message types.
//!
//! These mirror the message objects the backend stores per session and
//! returns from the history endpoints.

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human side of the conversation.
    User,
    /// The model side of the conversation.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of a session's chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Base64-encoded image payload, present on image-attached user turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// When the backend recorded the message.
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            image: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message stamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            image: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether this message carries an image attachment.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
