//! Storage error types.

use thiserror::Error;

/// Errors from checking uploads and from talking to the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Upload exceeds the configured size limit.
    #[error("file is {size} bytes, the limit is {max} bytes")]
    TooLarge {
        /// Upload size.
        size: u64,
        /// Configured limit.
        max: u64,
    },

    /// Upload MIME type is not on the allow-list.
    #[error("file type '{0}' is not accepted")]
    UnsupportedType(String),

    /// No object under the requested key.
    #[error("no stored object: {0}")]
    Missing(String),

    /// The backend cannot perform the operation, e.g. signing URLs on the
    /// local filesystem.
    #[error("operation not supported by the storage backend: {0}")]
    Unsupported(String),

    /// Provider settings are incomplete or invalid.
    #[error("invalid storage configuration: {0}")]
    Config(String),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Upload larger than `max` bytes.
    #[must_use]
    pub fn too_large(size: u64, max: u64) -> Self {
        Self::TooLarge { size, max }
    }

    /// Upload with a MIME type outside the allow-list.
    #[must_use]
    pub fn unsupported_type(mime_type: impl Into<String>) -> Self {
        Self::UnsupportedType(mime_type.into())
    }

    /// Missing object.
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing(key.into())
    }

    /// Invalid configuration.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Backend failure.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::missing(err.to_string()),
            opendal::ErrorKind::Unsupported => Self::Unsupported(err.to_string()),
            _ => Self::backend(err.to_string()),
        }
    }
}
