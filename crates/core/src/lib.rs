//! Core business logic for Herald.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain types, the attachment lifecycle and object storage access live here.
//!
//! # Modules
//!
//! - `content` - Blog posts and news items with their image attachments
//! - `storage` - Object storage behind signed URLs

pub mod content;
pub mod storage;
