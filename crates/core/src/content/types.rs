//! Content types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author recorded when a create request names none.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Longest accepted author name, in characters.
pub const MAX_AUTHOR_LEN: usize = 255;

/// Kind of content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Blog post.
    Blog,
    /// News item.
    News,
}

impl ContentKind {
    /// Convert to database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::News => "news",
        }
    }

    /// Parse from database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blog" => Some(Self::Blog),
            "news" => Some(Self::News),
            _ => None,
        }
    }

    /// Human readable name used in messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::News => "news item",
        }
    }

    /// Name of the multipart field carrying the image.
    #[must_use]
    pub fn upload_field(&self) -> &'static str {
        match self {
            Self::Blog => "blog_image",
            Self::News => "news_image",
        }
    }
}

/// A blog post or news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Record kind.
    #[serde(skip)]
    pub kind: ContentKind,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author name.
    pub author: String,
    /// Key of the attached image in the object store.
    pub image_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A record as returned by reads, with its signed image URL when one
/// could be issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    /// The record.
    #[serde(flatten)]
    pub record: ContentRecord,
    /// Signed read URL of the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ContentView {
    /// View of a record without image URL.
    #[must_use]
    pub fn without_url(record: ContentRecord) -> Self {
        Self {
            record,
            image_url: None,
        }
    }
}

/// Textual fields submitted by a create or update request.
///
/// Every field is optional here; `attach` requires title and content,
/// `replace` falls back to the stored value for each missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentInput {
    /// Title.
    pub title: Option<String>,
    /// Body text.
    pub content: Option<String>,
    /// Author name.
    pub author: Option<String>,
}

impl ContentInput {
    /// Trimmed title, `None` when absent or blank.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        non_blank(self.title.as_deref())
    }

    /// Trimmed body, `None` when absent or blank.
    #[must_use]
    pub fn content(&self) -> Option<String> {
        non_blank(self.content.as_deref())
    }

    /// Trimmed author, `None` when absent or blank.
    #[must_use]
    pub fn author(&self) -> Option<String> {
        non_blank(self.author.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Input for inserting a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author name.
    pub author: String,
    /// Key of the uploaded image.
    pub image_name: Option<String>,
}

/// Update applied to an existing record.
///
/// Textual fields are already resolved against the stored record.
/// `image_name` is only written when `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPatch {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author name.
    pub author: String,
    /// New image key.
    pub image_name: Option<String>,
}

/// An uploaded file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl Upload {
    /// Create an upload.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}
