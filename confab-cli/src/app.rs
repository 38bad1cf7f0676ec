//! Application state.
//!
//! One explicit state object owned by the controller; every mutation goes
//! through it rather than scattered globals.

use confab_core::{Attachment, ModelInfo, SessionSummary};
use std::path::PathBuf;

/// An image staged for the next send.
#[derive(Debug, Clone)]
pub struct PendingAttachment {
    /// Where it was loaded from, for display.
    pub path: PathBuf,
    /// The validated payload.
    pub attachment: Attachment,
}

/// Everything the front-end tracks between commands.
#[derive(Debug, Default)]
pub struct AppState {
    /// Known sessions, newest first (server order).
    pub sessions: Vec<SessionSummary>,
    /// The active session, once known.
    pub current_session_id: Option<String>,
    /// Model catalog; may be the fallback when the endpoint is down.
    pub models: Vec<ModelInfo>,
    /// Model sent with chat requests.
    pub selected_model: String,
    /// Image staged for the next send, if any.
    pub pending_attachment: Option<PendingAttachment>,
}

impl AppState {
    /// Title of the active session, when known.
    #[must_use]
    pub fn current_session_title(&self) -> Option<&str> {
        let current = self.current_session_id.as_deref()?;
        self.sessions
            .iter()
            .find(|s| s.id == current)
            .map(|s| s.title.as_str())
    }

    /// Resolve a user-supplied session reference: a 1-based list index or
    /// a session ID (exact or unambiguous prefix).
    #[must_use]
    pub fn resolve_session(&self, reference: &str) -> Option<&SessionSummary> {
        if let Ok(index) = reference.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| self.sessions.get(i));
        }

        if let Some(exact) = self.sessions.iter().find(|s| s.id == reference) {
            return Some(exact);
        }

        let mut matches = self.sessions.iter().filter(|s| s.id.starts_with(reference));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Whether the catalog knows this model ID.
    #[must_use]
    pub fn knows_model(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m.id == model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(id: &str, title: &str) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
            is_current: false,
        }
    }

    fn state_with_sessions() -> AppState {
        AppState {
            sessions: vec![session("aaa-111", "First"), session("bbb-222", "Second")],
            current_session_id: Some("bbb-222".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_current_session_title() {
        let state = state_with_sessions();
        assert_eq!(state.current_session_title(), Some("Second"));
    }

    #[test]
    fn test_resolve_by_index() {
        let state = state_with_sessions();
        assert_eq!(state.resolve_session("1").unwrap().id, "aaa-111");
        assert_eq!(state.resolve_session("2").unwrap().id, "bbb-222");
        assert!(state.resolve_session("0").is_none());
        assert!(state.resolve_session("3").is_none());
    }

    #[test]
    fn test_resolve_by_id_and_prefix() {
        let state = state_with_sessions();
        assert_eq!(state.resolve_session("bbb-222").unwrap().title, "Second");
        assert_eq!(state.resolve_session("aaa").unwrap().title, "First");
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let mut state = state_with_sessions();
        state.sessions.push(SessionSummary {
            id: "aaa-999".to_string(),
            title: "Third".to_string(),
            created_at: Utc::now(),
            is_current: false,
        });
        assert!(state.resolve_session("aaa").is_none());
    }

    #[test]
    fn test_knows_model() {
        let mut state = AppState::default();
        state.models = ModelInfo::default_catalog();
        assert!(state.knows_model("gpt-4o"));
        assert!(!state.knows_model("made-up"));
    }
}
