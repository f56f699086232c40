//! Application-wide error types.

use serde_json::{Value, json};
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body over the accepted size.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Object storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to API clients.
    ///
    /// Client errors carry their detail; server errors keep it out of the
    /// response body and only expose a generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Validation(msg) | Self::PayloadTooLarge(msg) => {
                msg.clone()
            }
            Self::Database(_) => "A database error occurred".to_string(),
            Self::Storage(_) => "A storage error occurred".to_string(),
            Self::Internal(_) => "An error occurred".to_string(),
        }
    }

    /// JSON body of the error response: `{ "msg": ... }`.
    #[must_use]
    pub fn body(&self) -> Value {
        json!({ "msg": self.public_message() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound("x".into()), 404, "NOT_FOUND")]
    #[case(AppError::Validation("x".into()), 400, "VALIDATION_ERROR")]
    #[case(AppError::PayloadTooLarge("x".into()), 413, "PAYLOAD_TOO_LARGE")]
    #[case(AppError::Database("x".into()), 500, "DATABASE_ERROR")]
    #[case(AppError::Storage("x".into()), 500, "STORAGE_ERROR")]
    #[case(AppError::Internal("x".into()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = AppError::Storage("bucket unreachable".into());
        assert_eq!(err.to_string(), "Storage error: bucket unreachable");
    }

    #[test]
    fn test_body_hides_server_detail() {
        let err = AppError::Database("connection reset by peer".into());
        assert_eq!(err.body(), json!({ "msg": "A database error occurred" }));

        let err = AppError::Validation("Title and content are required".into());
        assert_eq!(
            err.body(),
            json!({ "msg": "Title and content are required" })
        );
    }
}
