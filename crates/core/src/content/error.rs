//! Content error types.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Errors raised by content operations.
///
/// Store failures are split by the call that failed so callers can tell an
/// aborted upload from an aborted delete.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Request is missing a required field or carries an unacceptable file.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record with this ID.
    #[error("content not found: {0}")]
    NotFound(Uuid),

    /// Uploading the image failed.
    #[error("image upload failed: {0}")]
    StoreUpload(#[source] StorageError),

    /// Deleting an image failed.
    #[error("image delete failed: {0}")]
    StoreDelete(#[source] StorageError),

    /// Issuing a signed URL failed.
    #[error("signed url failed: {0}")]
    StoreUrl(#[source] StorageError),

    /// Repository operation failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ContentError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// Create a persistence error.
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
