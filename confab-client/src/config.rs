//! Client configuration.

use reqwest::Client;
use std::time::Duration;

/// Default backend address, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Backend base URL. Falls back to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// HTTP Basic username, when the backend has auth enabled.
    pub username: Option<String>,
    /// HTTP Basic password.
    pub password: Option<String>,
    /// Request timeout. Unset means no client-wide timeout, which streaming
    /// responses require.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set Basic auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load from environment variables with the given prefix.
    ///
    /// Looks for `{PREFIX}_BASE_URL`, `{PREFIX}_USERNAME` and
    /// `{PREFIX}_PASSWORD`.
    pub fn from_env(prefix: &str) -> Self {
        Self {
            base_url: std::env::var(format!("{}_BASE_URL", prefix)).ok(),
            username: std::env::var(format!("{}_USERNAME", prefix)).ok(),
            password: std::env::var(format!("{}_PASSWORD", prefix)).ok(),
            timeout: None,
        }
    }

    /// Build an HTTP client with this config.
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().unwrap_or_default()
    }
}
