//! Command execution against the API client.
//!
//! The controller owns the [`AppState`] and the [`ApiClient`]; the input
//! loop hands it one [`Command`] at a time and awaits the result before
//! reading further input, so at most one send (and one stream) is ever in
//! flight.

use crate::app::{AppState, PendingAttachment};
use crate::command::{Command, HELP};
use crate::notify;
use crate::sink::TermSink;
use colored::Colorize;
use confab_client::{ApiClient, ApiError};
use confab_core::{Attachment, ChatMessage, ModelInfo, Role};
use std::path::PathBuf;

/// Executes commands and keeps the application state current.
pub struct Controller {
    client: ApiClient,
    state: AppState,
}

impl Controller {
    /// Create a controller with an initial model selection.
    pub fn new(client: ApiClient, default_model: Option<String>) -> Self {
        let state = AppState {
            selected_model: default_model.unwrap_or_else(|| "gpt-4o".to_string()),
            ..Default::default()
        };
        Self { client, state }
    }

    /// Read-only view of the state, mainly for the prompt line.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Startup sequence: sessions, history, models, connectivity report.
    ///
    /// Each step degrades independently; a dead backend still leaves a
    /// usable prompt for retrying.
    pub async fn init(&mut self) {
        let connected = match self.refresh_sessions().await {
            Ok(()) => true,
            Err(err) => {
                notify::error(&format!("Failed to load sessions: {err}"));
                false
            }
        };

        if connected {
            match self.client.messages().await {
                Ok(messages) if !messages.is_empty() => render_history(&messages),
                Ok(_) => notify::info("New conversation. Type a message, /help for commands."),
                Err(err) => notify::error(&format!("Failed to load history: {err}")),
            }
        }

        match self.client.models().await {
            Ok(models) if !models.is_empty() => self.state.models = models,
            Ok(_) | Err(_) => {
                self.state.models = ModelInfo::default_catalog();
                notify::info("Model list unavailable, using defaults");
            }
        }

        if connected {
            notify::success(&format!("Connected to {}", self.client.base_url()));
        } else {
            notify::error("Backend unreachable; messages will fail until it returns");
        }
    }

    /// Execute one command. Returns `false` when the user asked to quit.
    pub async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Help => println!("{HELP}"),
            Command::Send(text) => self.send(text).await,
            Command::NewSession => self.new_session().await,
            Command::ListSessions => self.list_sessions().await,
            Command::SwitchSession(reference) => self.switch_session(reference).await,
            Command::DeleteSession(reference) => self.delete_session(reference).await,
            Command::History => self.history().await,
            Command::ListModels => self.list_models(),
            Command::SelectModel(id) => self.select_model(id),
            Command::Attach(path) => self.attach(path).await,
            Command::Detach => self.detach(),
            Command::Status => self.status().await,
        }
        true
    }

    async fn send(&mut self, text: String) {
        // The staged image is consumed by the attempt either way, like the
        // web client clearing its preview on submit.
        let result = match self.state.pending_attachment.take() {
            Some(pending) => self.send_with_image(pending, &text).await,
            None => self.send_streaming(&text).await,
        };

        match result {
            Ok(()) => {
                // Refresh so server-side title updates show up.
                if let Err(err) = self.refresh_sessions().await {
                    tracing::debug!(%err, "session refresh after send failed");
                }
            }
            Err(err) => notify::error(&format!("Failed to send message: {err}")),
        }
    }

    async fn send_streaming(&mut self, text: &str) -> Result<(), ApiError> {
        let mut sink = TermSink::stdout();
        self.client
            .stream_chat(text, &self.state.selected_model, &mut sink)
            .await?;
        Ok(())
    }

    async fn send_with_image(
        &mut self,
        pending: PendingAttachment,
        text: &str,
    ) -> Result<(), ApiError> {
        let reply = self
            .client
            .send_image(pending.attachment, text, &self.state.selected_model)
            .await?;
        println!("{} {}", "assistant>".green().bold(), reply.response);
        Ok(())
    }

    async fn refresh_sessions(&mut self) -> Result<(), ApiError> {
        let list = self.client.list_sessions().await?;
        self.state.sessions = list.sessions;
        self.state.current_session_id = Some(list.current_session_id);
        Ok(())
    }

    async fn new_session(&mut self) {
        match self.client.create_session().await {
            Ok(session_id) => {
                self.state.current_session_id = Some(session_id);
                if let Err(err) = self.refresh_sessions().await {
                    tracing::debug!(%err, "session refresh after create failed");
                }
                notify::success("Started a new conversation");
            }
            Err(err) => notify::error(&format!("Failed to create conversation: {err}")),
        }
    }

    async fn list_sessions(&mut self) {
        if let Err(err) = self.refresh_sessions().await {
            notify::error(&format!("Failed to load sessions: {err}"));
            return;
        }
        if self.state.sessions.is_empty() {
            notify::info("No conversations yet");
            return;
        }
        for (index, session) in self.state.sessions.iter().enumerate() {
            let marker = if Some(session.id.as_str()) == self.state.current_session_id.as_deref() {
                "*"
            } else {
                " "
            };
            println!(
                "{marker} {:>2}. {}  {}",
                index + 1,
                session.title.bold(),
                session
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .dimmed(),
            );
        }
    }

    async fn switch_session(&mut self, reference: String) {
        let Some(session) = self.state.resolve_session(&reference) else {
            notify::error(&format!("No such conversation: {reference}"));
            return;
        };
        let session_id = session.id.clone();

        if Some(session_id.as_str()) == self.state.current_session_id.as_deref() {
            notify::info("Already on that conversation");
            return;
        }

        match self.client.switch_session(&session_id).await {
            Ok(switched) => {
                self.state.current_session_id = Some(switched.session_id);
                if let Err(err) = self.refresh_sessions().await {
                    tracing::debug!(%err, "session refresh after switch failed");
                }
                if let Some(title) = self.state.current_session_title() {
                    notify::success(&format!("Switched to: {title}"));
                }
                render_history(&switched.messages);
            }
            Err(err) => notify::error(&format!("Failed to switch conversation: {err}")),
        }
    }

    async fn delete_session(&mut self, reference: String) {
        let Some(session) = self.state.resolve_session(&reference) else {
            notify::error(&format!("No such conversation: {reference}"));
            return;
        };
        let session_id = session.id.clone();

        match self.client.delete_session(&session_id).await {
            Ok(deleted) => {
                if let Some(new_id) = deleted.new_session_id {
                    // The current conversation was removed; the backend
                    // already switched us to a fresh one.
                    self.state.current_session_id = Some(new_id);
                }
                if let Err(err) = self.refresh_sessions().await {
                    tracing::debug!(%err, "session refresh after delete failed");
                }
                notify::success("Conversation deleted");
            }
            Err(err) => notify::error(&format!("Failed to delete conversation: {err}")),
        }
    }

    async fn history(&mut self) {
        match self.client.messages().await {
            Ok(messages) if messages.is_empty() => notify::info("No messages yet"),
            Ok(messages) => render_history(&messages),
            Err(err) => notify::error(&format!("Failed to load history: {err}")),
        }
    }

    fn list_models(&self) {
        for model in &self.state.models {
            let marker = if model.id == self.state.selected_model {
                "*"
            } else {
                " "
            };
            println!(
                "{marker} {}  {}  {}",
                model.id.bold(),
                model.name,
                model.description.dimmed()
            );
        }
    }

    fn select_model(&mut self, model_id: String) {
        if !self.state.models.is_empty() && !self.state.knows_model(&model_id) {
            notify::error(&format!("Unknown model: {model_id} (see /models)"));
            return;
        }
        self.state.selected_model = model_id;
        notify::success(&format!("Model set to {}", self.state.selected_model));
    }

    async fn attach(&mut self, path: PathBuf) {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                notify::error(&format!("Not a file path: {}", path.display()));
                return;
            }
        };

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(err) => {
                notify::error(&format!("Failed to read {}: {err}", path.display()));
                return;
            }
        };

        match Attachment::from_bytes(file_name, data) {
            Ok(attachment) => {
                notify::success(&format!(
                    "Attached {} ({:.1} KiB); it will be sent with your next message",
                    attachment.file_name,
                    attachment.len() as f64 / 1024.0
                ));
                self.state.pending_attachment = Some(PendingAttachment { path, attachment });
            }
            Err(err) => notify::error(&err.to_string()),
        }
    }

    fn detach(&mut self) {
        if self.state.pending_attachment.take().is_some() {
            notify::info("Attachment removed");
        } else {
            notify::info("Nothing attached");
        }
    }

    async fn status(&mut self) {
        if self.client.ping().await {
            notify::success(&format!("API connected ({})", self.client.base_url()));
        } else {
            notify::error(&format!("API unreachable ({})", self.client.base_url()));
            return;
        }

        match self.client.security_status().await {
            Ok(status) => {
                notify::info(&format!("Client IP: {}", status.client_ip));
                notify::info(&format!(
                    "Auth: {}  rate limiting: {}  IP whitelist: {}",
                    on_off(status.security_features.authentication),
                    on_off(status.security_features.rate_limiting),
                    on_off(status.security_features.ip_whitelist),
                ));
                if let Some(limits) = status.rate_limit_config {
                    notify::info(&format!(
                        "Rate limit: {}/{} requests used in the last {}s",
                        limits.current_requests, limits.requests_per_window, limits.window_seconds
                    ));
                }
            }
            Err(err) => notify::info(&format!("Security status unavailable: {err}")),
        }

        notify::info(&format!("Model: {}", self.state.selected_model));
        if let Some(title) = self.state.current_session_title() {
            notify::info(&format!("Conversation: {title}"));
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn render_history(messages: &[ChatMessage]) {
    for message in messages {
        let prefix = match message.role {
            Role::User => "you>".cyan().bold(),
            Role::Assistant => "assistant>".green().bold(),
        };
        let marker = if message.has_image() { " [image]" } else { "" };
        println!(
            "{prefix} {}{}  {}",
            message.content,
            marker.dimmed(),
            message
                .timestamp
                .format("%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_client::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_sessions(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sessions": [
                    {"id": "s1", "title": "First", "created_at": "2024-05-01T10:00:00", "is_current": true}
                ],
                "current_session_id": "s1"
            })))
            .mount(server)
            .await;
    }

    fn controller_for(server: &MockServer) -> Controller {
        let client =
            ApiClient::new(ClientConfig::new().with_base_url(server.uri())).unwrap();
        Controller::new(client, None)
    }

    #[tokio::test]
    async fn test_init_populates_state() {
        let server = MockServer::start().await;
        mock_sessions(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"id": "gpt-4o", "name": "GPT-4o", "description": ""}]
            })))
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        controller.init().await;

        assert_eq!(controller.state().sessions.len(), 1);
        assert_eq!(controller.state().current_session_id.as_deref(), Some("s1"));
        assert_eq!(controller.state().models.len(), 1);
    }

    #[tokio::test]
    async fn test_init_falls_back_to_default_models() {
        let server = MockServer::start().await;
        mock_sessions(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/models"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        controller.init().await;

        assert_eq!(controller.state().models, ModelInfo::default_catalog());
    }

    #[tokio::test]
    async fn test_send_refreshes_sessions_after_stream() {
        let server = MockServer::start().await;
        mock_sessions(&server).await;
        let body = concat!(
            "data: {\"type\":\"start\"}\n",
            "data: {\"type\":\"chunk\",\"content\":\"hi\"}\n",
            "data: {\"type\":\"end\"}\n",
        );
        Mock::given(method("POST"))
            .and(path("/api/chat/stream"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body.as_bytes().to_vec(), "text/event-stream"),
            )
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        assert!(controller.handle(Command::Send("hello".into())).await);
        // The post-send refresh populated the session list.
        assert_eq!(controller.state().sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_select_model_validates_against_catalog() {
        let server = MockServer::start().await;
        let mut controller = controller_for(&server);
        controller.state.models = ModelInfo::default_catalog();

        controller.handle(Command::SelectModel("made-up".into())).await;
        assert_eq!(controller.state().selected_model, "gpt-4o");

        controller.handle(Command::SelectModel("gpt-4o".into())).await;
        assert_eq!(controller.state().selected_model, "gpt-4o");
    }

    #[tokio::test]
    async fn test_quit_stops_loop() {
        let server = MockServer::start().await;
        let mut controller = controller_for(&server);
        assert!(!controller.handle(Command::Quit).await);
    }
}
