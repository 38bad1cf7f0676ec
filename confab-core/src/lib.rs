//! # confab-core
//!
//! Core domain types for the confab chat client.
//!
//! This crate holds the I/O-free types shared by the rest of the stack:
//!
//! - **Messages**: chat history entries and roles
//! - **Sessions**: conversation summaries as reported by the backend
//! - **Models**: the selectable model catalog
//! - **Media**: image attachment validation and MIME handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod media;
pub mod message;
pub mod model;
pub mod session;
pub mod timestamp;

// Re-exports for convenience
pub use media::{Attachment, AttachmentError, ImageMediaType, MAX_IMAGE_BYTES};
pub use message::{ChatMessage, Role};
pub use model::ModelInfo;
pub use session::SessionSummary;
