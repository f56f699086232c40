//! Contact message routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{db_error, error_response, parse_id},
};
use herald_db::repositories::{ContactRepository, CreateContactInput};
use herald_shared::AppError;

/// Creates the contact routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact", get(list_messages).post(create_message))
        .route("/contact/{id}", get(get_message).delete(delete_message))
}

/// Request body for sending a contact message.
#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageRequest {
    /// Sender name.
    pub name: Option<String>,
    /// Sender email.
    pub email: Option<String>,
    /// Message body.
    pub message: Option<String>,
}

impl CreateMessageRequest {
    /// All three fields, trimmed, or `None` if any is missing or blank.
    fn into_input(self) -> Option<CreateContactInput> {
        let field = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Some(CreateContactInput {
            name: field(self.name)?,
            email: field(self.email)?,
            subject: field(self.message)?,
        })
    }
}

fn not_found(raw_id: &str) -> AppError {
    AppError::NotFound(format!("A message with the id of {raw_id} was not found"))
}

/// GET `/contact`
async fn list_messages(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ContactRepository::new(state.db.clone());

    match repo.list().await {
        Ok(messages) if messages.is_empty() => error_response(&AppError::NotFound(
            "There are no messages available at the moment".to_string(),
        )),
        Ok(messages) => (
            StatusCode::OK,
            Json(json!({ "nbHits": messages.len(), "messages": messages })),
        )
            .into_response(),
        Err(e) => error_response(&db_error(&e)),
    }
}

/// POST `/contact`
async fn create_message(
    State(state): State<AppState>,
    Json(payload): Json<CreateMessageRequest>,
) -> impl IntoResponse {
    let Some(input) = payload.into_input() else {
        return error_response(&AppError::Validation(
            "Please provide inputs for all fields".to_string(),
        ));
    };

    let repo = ContactRepository::new(state.db.clone());
    match repo.create(input).await {
        Ok(message) => {
            info!(id = %message.id, "Contact message stored");
            (
                StatusCode::CREATED,
                Json(json!({ "msg": "Message sent sucessfully", "message": message })),
            )
                .into_response()
        }
        Err(e) => error_response(&db_error(&e)),
    }
}

/// GET `/contact/{id}`
async fn get_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let repo = ContactRepository::new(state.db.clone());
    match repo.find_by_id(id).await {
        Ok(Some(message)) => {
            (StatusCode::OK, Json(json!({ "message": message }))).into_response()
        }
        Ok(None) => error_response(&not_found(&raw_id)),
        Err(e) => error_response(&db_error(&e)),
    }
}

/// DELETE `/contact/{id}`
async fn delete_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let repo = ContactRepository::new(state.db.clone());
    match repo.delete(id).await {
        Ok(Some(message)) => {
            info!(id = %id, "Contact message deleted");
            (
                StatusCode::OK,
                Json(json!({ "msg": "Message Deleted successfully!", "message": message })),
            )
                .into_response()
        }
        Ok(None) => error_response(&not_found(&raw_id)),
        Err(e) => error_response(&db_error(&e)),
    }
}
