//! Mapping of domain errors to HTTP responses.
//!
//! Every error body has the shape `{ "msg": ... }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use tracing::{error, warn};
use uuid::Uuid;

use herald_core::content::{ContentError, ContentKind};
use herald_shared::AppError;

/// Convert a content error into an application error, naming the
/// resource in not-found messages.
#[must_use]
pub fn content_error(kind: ContentKind, e: ContentError) -> AppError {
    match e {
        ContentError::Validation(msg) => AppError::Validation(msg),
        ContentError::NotFound(id) => AppError::NotFound(format!(
            "A {} with the id of {id} was not found",
            kind.label()
        )),
        ContentError::StoreUpload(e) | ContentError::StoreDelete(e) | ContentError::StoreUrl(e) => {
            AppError::Storage(e.to_string())
        }
        ContentError::Persistence(msg) => AppError::Database(msg),
    }
}

/// Convert a database error into an application error.
#[must_use]
pub fn db_error(e: &DbErr) -> AppError {
    AppError::Database(e.to_string())
}

/// Parse a path segment as a record ID.
///
/// # Errors
///
/// Returns a `Validation` error naming the raw value when it is not a UUID.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid ID format: {raw}")))
}

/// Render an application error, logging server-side failures.
#[must_use]
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(code = err.error_code(), error = %err, "Request failed");
    } else {
        warn!(code = err.error_code(), error = %err, "Request rejected");
    }

    (status, Json(err.body())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::storage::StorageError;

    #[test]
    fn test_not_found_names_resource() {
        let id = Uuid::nil();
        let err = content_error(ContentKind::News, ContentError::not_found(id));
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.public_message(),
            format!("A news item with the id of {id} was not found")
        );
    }

    #[test]
    fn test_store_failures_are_server_errors() {
        for e in [
            ContentError::StoreUpload(StorageError::backend("down")),
            ContentError::StoreDelete(StorageError::backend("down")),
            ContentError::StoreUrl(StorageError::backend("down")),
        ] {
            let err = content_error(ContentKind::Blog, e);
            assert_eq!(err.status_code(), 500);
            assert!(!err.public_message().contains("down"));
        }
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("0192f1a4-7b3c-7d2e-9f10-1234567890ab").is_ok());
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.public_message(), "Invalid ID format: abc");
        assert_eq!(err.status_code(), 400);
    }
}
