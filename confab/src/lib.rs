//! # confab
//!
//! Client stack for a session-based chat backend with streaming replies.
//!
//! The backend speaks plain JSON for session management, history, models and
//! uploads, and a line-oriented `data: {json}` event stream for chat replies.
//! This crate re-exports the pieces:
//!
//! - [`core`] — domain types (messages, sessions, models, attachments)
//! - [`streaming`] — the stream consumer and its sink interface
//! - [`client`] — the HTTP API client
//!
//! ## Quick Start
//!
//! ```ignore
//! use confab::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new(ClientConfig::new())?;
//!
//!     struct Printer;
//!     impl StreamSink for Printer {
//!         fn on_start(&mut self) {}
//!         fn on_update(&mut self, text: &str) { print!("\r{text}"); }
//!         fn on_complete(&mut self, text: &str) { println!("\r{text}"); }
//!         fn on_error(&mut self, message: &str) { eprintln!("error: {message}"); }
//!     }
//!
//!     let mut sink = Printer;
//!     client.stream_chat("Hello!", "gpt-4o", &mut sink).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

/// Domain types.
pub use confab_core as core;

/// HTTP API client.
pub use confab_client as client;

/// Streaming response consumption.
pub use confab_streaming as streaming;

// Flat re-exports of the common surface.
pub use confab_client::{ApiClient, ApiError, ClientConfig};
pub use confab_core::{
    Attachment, AttachmentError, ChatMessage, ImageMediaType, ModelInfo, Role, SessionSummary,
};
pub use confab_streaming::{
    ChatStream, ChatStreamEvent, StreamError, StreamResult, StreamSink, StreamState,
};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::client::{ApiClient, ApiError, ClientConfig};
    pub use crate::core::{
        Attachment, ChatMessage, ImageMediaType, ModelInfo, Role, SessionSummary,
    };
    pub use crate::streaming::{
        ChatStream, ChatStreamEvent, StreamError, StreamResult, StreamSink, StreamState,
    };
}

/// Returns the current version of confab.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
