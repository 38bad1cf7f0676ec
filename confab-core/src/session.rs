//! Conversation session summaries.

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One conversation as listed by the sessions endpoint.
///
/// The backend owns session identity and titles; the title starts as a
/// placeholder and is rewritten server-side from the first user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Server-assigned session ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Whether this is the backend's notion of the active session.
    #[serde(default)]
    pub is_current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_backend_json() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "title": "New chat",
            "created_at": "2024-05-01T09:00:00.123456",
            "is_current": true
        }"#;
        let session: SessionSummary = serde_json::from_str(json).unwrap();
        assert!(session.is_current);
        assert_eq!(session.title, "New chat");
    }

    #[test]
    fn test_is_current_defaults_false() {
        let json = r#"{
            "id": "abc",
            "title": "t",
            "created_at": "2024-05-01T09:00:00"
        }"#;
        let session: SessionSummary = serde_json::from_str(json).unwrap();
        assert!(!session.is_current);
    }
}
