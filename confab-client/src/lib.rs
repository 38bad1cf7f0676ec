//! # confab-client
//!
//! HTTP API client for the confab chat backend.
//!
//! Wraps every backend endpoint: session CRUD, message history, the model
//! catalog, non-streaming chat, image-attached chat (multipart upload), the
//! streaming chat endpoint, and the security status report. The streaming
//! endpoint is consumed through `confab-streaming`'s
//! [`StreamSink`](confab_streaming::StreamSink).
//!
//! ## Example
//!
//! ```ignore
//! use confab_client::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::new(
//!     ClientConfig::new()
//!         .with_base_url("http://127.0.0.1:5000")
//!         .with_credentials("admin", "secret"),
//! )?;
//!
//! let sessions = client.list_sessions().await?;
//! let reply = client.chat("Hello!", "gpt-4o").await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod response;

// Re-exports
pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use response::{
    ChatReply, ChatRequest, CreatedSession, DeletedSession, MessageHistory, ModelCatalog,
    SecurityStatus, SessionList, SwitchedSession, UploadReply,
};
