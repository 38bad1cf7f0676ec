//! # confab-streaming
//!
//! Streaming response consumption for the confab chat client.
//!
//! The streaming chat endpoint answers with a line-oriented body: lines of
//! interest begin with `data: ` followed by a JSON event object. This crate
//! turns that byte stream into a well-ordered sequence of typed events and
//! drives rendering callbacks from them.
//!
//! ## Core Concepts
//!
//! - **[`ChatStreamEvent`]**: one decoded wire event (start/chunk/end/error)
//! - **[`EventDecoder`]**: incremental, chunk-boundary-safe line decoding
//! - **[`EventStream`]**: `futures::Stream` adapter over a response body
//! - **[`ChatStream`]**: per-send session owning the accumulating reply
//! - **[`StreamSink`]**: the UI-facing callback surface
//!
//! ## Example
//!
//! ```ignore
//! use confab_streaming::{consume, StreamSink};
//!
//! struct Printer;
//! impl StreamSink for Printer {
//!     fn on_start(&mut self) {}
//!     fn on_update(&mut self, text: &str) { print!("\r{text}"); }
//!     fn on_complete(&mut self, text: &str) { println!("\r{text}"); }
//!     fn on_error(&mut self, message: &str) { eprintln!("error: {message}"); }
//! }
//!
//! let mut sink = Printer;
//! let reply = consume(response.bytes_stream(), &mut sink).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod consumer;
pub mod decoder;
pub mod error;
pub mod events;
pub mod stream;

// Re-exports
pub use consumer::{consume, ChatStream, StreamSink, StreamState};
pub use decoder::EventDecoder;
pub use error::{StreamError, StreamResult};
pub use events::ChatStreamEvent;
pub use stream::EventStream;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        consume, ChatStream, ChatStreamEvent, EventDecoder, EventStream, StreamError,
        StreamResult, StreamSink, StreamState,
    };
}
