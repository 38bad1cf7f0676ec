//! The API client.

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::ApiError;
use crate::response::{
    ChatReply, ChatRequest, CreatedSession, DeletedSession, ErrorBody, MessageHistory,
    ModelCatalog, SecurityStatus, SessionList, SwitchedSession, UploadReply,
};
use confab_core::{Attachment, ChatMessage, ModelInfo};
use confab_streaming::{ChatStream, StreamSink};
use reqwest::multipart;
use reqwest::{RequestBuilder, Response};
use url::Url;

/// Client for the chat backend's HTTP API.
///
/// Covers the plain JSON endpoints (sessions, history, models, chat,
/// upload) and the streaming chat endpoint, which is consumed through a
/// [`StreamSink`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Fails when the base URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url =
            Url::parse(base).map_err(|err| ApiError::InvalidBaseUrl(format!("{base}: {err}")))?;

        Ok(Self {
            http: config.build_client(),
            base_url,
            username: config.username,
            password: config.password,
        })
    }

    /// Create a client from `CONFAB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails when `CONFAB_BASE_URL` is set but invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env("CONFAB"))
    }

    /// The resolved base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{path}: {err}")))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(username) => builder.basic_auth(username, self.password.as_deref()),
            None => builder,
        }
    }

    /// Map a non-success response to a typed error, extracting the
    /// backend's `{"error": ...}` body when present.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| status.to_string());

        Err(match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            429 => ApiError::RateLimited(message),
            code => ApiError::Api {
                status: code,
                message,
            },
        })
    }

    /// List all sessions, newest first.
    ///
    /// # Errors
    ///
    /// Standard HTTP/status failures.
    pub async fn list_sessions(&self) -> Result<SessionList, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/api/sessions")?))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a new session and make it current. Returns its ID.
    ///
    /// # Errors
    ///
    /// Standard HTTP/status failures.
    pub async fn create_session(&self) -> Result<String, ApiError> {
        let response = self
            .authed(self.http.post(self.url("/api/sessions")?))
            .send()
            .await?;
        let created: CreatedSession = Self::check(response).await?.json().await?;
        Ok(created.session_id)
    }

    /// Switch the active session, returning its history.
    ///
    /// # Errors
    ///
    /// `NotFound` when the session does not exist or belongs to another user.
    pub async fn switch_session(&self, session_id: &str) -> Result<SwitchedSession, ApiError> {
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/sessions/{session_id}/switch"))?),
            )
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a session.
    ///
    /// When the deleted session was current, the backend creates a
    /// replacement and reports it in `new_session_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the session does not exist or belongs to another user.
    pub async fn delete_session(&self, session_id: &str) -> Result<DeletedSession, ApiError> {
        tracing::debug!(session_id, "deleting session");
        let response = self
            .authed(
                self.http
                    .delete(self.url(&format!("/api/sessions/{session_id}"))?),
            )
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch the current session's message history.
    ///
    /// # Errors
    ///
    /// Standard HTTP/status failures.
    pub async fn messages(&self) -> Result<Vec<ChatMessage>, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/api/messages")?))
            .send()
            .await?;
        let history: MessageHistory = Self::check(response).await?.json().await?;
        Ok(history.messages)
    }

    /// Fetch the selectable model catalog.
    ///
    /// # Errors
    ///
    /// Standard HTTP/status failures.
    pub async fn models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/api/models")?))
            .send()
            .await?;
        let catalog: ModelCatalog = Self::check(response).await?.json().await?;
        Ok(catalog.models)
    }

    /// Send a chat message without streaming.
    ///
    /// # Errors
    ///
    /// `EmptyMessage` before any network traffic; otherwise standard
    /// HTTP/status failures.
    pub async fn chat(&self, message: &str, model: &str) -> Result<ChatReply, ApiError> {
        if message.trim().is_empty() {
            return Err(ApiError::EmptyMessage);
        }

        let response = self
            .authed(self.http.post(self.url("/api/chat")?))
            .json(&ChatRequest { message, model })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Send a chat message and consume the streaming reply.
    ///
    /// A non-success status fails the call before any sink dispatch; once
    /// streaming begins the sink receives the usual start/update/complete
    /// (or error) sequence. Returns the final assistant text.
    ///
    /// # Errors
    ///
    /// `EmptyMessage`, HTTP/status failures before streaming, or a
    /// [`StreamError`](confab_streaming::StreamError) once streaming began.
    pub async fn stream_chat<K: StreamSink>(
        &self,
        message: &str,
        model: &str,
        sink: &mut K,
    ) -> Result<String, ApiError> {
        if message.trim().is_empty() {
            return Err(ApiError::EmptyMessage);
        }

        tracing::debug!(model, "starting streaming chat request");
        let response = self
            .authed(self.http.post(self.url("/api/chat/stream")?))
            .json(&ChatRequest { message, model })
            .send()
            .await?;
        let response = Self::check(response).await?;

        let text = ChatStream::new()
            .run(response.bytes_stream(), sink)
            .await?;
        Ok(text)
    }

    /// Send a message with an image attachment (multipart upload).
    ///
    /// An empty message is allowed; the backend substitutes its default
    /// caption prompt.
    ///
    /// # Errors
    ///
    /// Standard HTTP/status failures.
    pub async fn send_image(
        &self,
        attachment: Attachment,
        message: &str,
        model: &str,
    ) -> Result<UploadReply, ApiError> {
        let part = multipart::Part::bytes(attachment.data)
            .file_name(attachment.file_name)
            .mime_str(attachment.media_type.mime_type())?;
        let form = multipart::Form::new()
            .part("image", part)
            .text("message", message.to_string())
            .text("model", model.to_string());

        let response = self
            .authed(self.http.post(self.url("/api/upload")?))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Connectivity probe: whether the sessions endpoint answers.
    pub async fn ping(&self) -> bool {
        self.list_sessions().await.is_ok()
    }

    /// Fetch the backend's security configuration report.
    ///
    /// # Errors
    ///
    /// Standard HTTP/status failures.
    pub async fn security_status(&self) -> Result<SecurityStatus, ApiError> {
        let response = self
            .authed(self.http.get(self.url("/api/security/status")?))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
