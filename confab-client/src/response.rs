//! Wire payload types for the backend's JSON endpoints.

use confab_core::{ChatMessage, ModelInfo, SessionSummary};
use serde::{Deserialize, Serialize};

/// `GET /api/sessions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionList {
    /// All sessions for the authenticated user, newest first.
    pub sessions: Vec<SessionSummary>,
    /// The session the backend currently considers active.
    pub current_session_id: String,
}

/// `POST /api/sessions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedSession {
    /// The new session's ID; the backend has already switched to it.
    pub session_id: String,
}

/// `POST /api/sessions/{id}/switch` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchedSession {
    /// The now-active session.
    pub session_id: String,
    /// Its full message history.
    pub messages: Vec<ChatMessage>,
}

/// `DELETE /api/sessions/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedSession {
    /// The removed session's ID.
    pub deleted: String,
    /// Replacement session, present when the current session was deleted.
    #[serde(default)]
    pub new_session_id: Option<String>,
}

/// `GET /api/messages` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageHistory {
    /// Current session history, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// `GET /api/models` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelCatalog {
    /// Models available for selection.
    pub models: Vec<ModelInfo>,
}

/// `POST /api/chat` and `POST /api/upload` request/response shapes.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// The user message.
    pub message: &'a str,
    /// Selected model ID.
    pub model: &'a str,
}

/// Non-streaming chat reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// The assistant's full reply.
    pub response: String,
    /// Session the exchange was recorded in.
    pub session_id: String,
}

/// Image-upload chat reply.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReply {
    /// The assistant's full reply.
    pub response: String,
    /// Session the exchange was recorded in.
    pub session_id: String,
    /// Whether the backend accepted and processed the image.
    #[serde(default)]
    pub image_processed: bool,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Primary error text.
    #[serde(default)]
    pub error: Option<String>,
    /// Secondary human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best available message, preferring `error` over `message`.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// `GET /api/security/status` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityStatus {
    /// The caller's IP as the backend sees it.
    pub client_ip: String,
    /// Which protections are enabled.
    pub security_features: SecurityFeatures,
    /// Rate limiter detail, present when rate limiting is enabled.
    #[serde(default)]
    pub rate_limit_config: Option<RateLimitConfig>,
    /// Whitelist detail, present when IP whitelisting is enabled.
    #[serde(default)]
    pub ip_whitelist_config: Option<IpWhitelistConfig>,
}

/// Enabled protection flags.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SecurityFeatures {
    /// Basic auth enforced.
    pub authentication: bool,
    /// Per-IP rate limiting enforced.
    pub rate_limiting: bool,
    /// IP whitelist enforced.
    pub ip_whitelist: bool,
}

/// Rate limiter configuration and current usage.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Allowed requests per window.
    pub requests_per_window: u32,
    /// Window length in seconds.
    pub window_seconds: u64,
    /// Requests already counted against the caller.
    #[serde(default)]
    pub current_requests: u32,
}

/// IP whitelist configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IpWhitelistConfig {
    /// Configured addresses.
    #[serde(default)]
    pub whitelist_ips: Vec<String>,
    /// Whether the caller is on the list.
    pub is_whitelisted: bool,
}
