//! Blog posts and news items with their image attachments.
//!
//! This module provides:
//! - Content domain types and the inputs used to create or patch them
//! - The attachment lifecycle (upload, signed read URL, replace, remove)
//! - Object key generation
//! - The persistence port implemented by the db crate

mod error;
mod keys;
mod service;
mod types;


pub use error::ContentError;
pub use keys::KeyGenerator;
pub use service::{AttachmentManager, ContentRepository};
pub use types::{
    ContentInput, ContentKind, ContentPatch, ContentRecord, ContentView, DEFAULT_AUTHOR,
    MAX_AUTHOR_LEN, NewContent, Upload,
};
