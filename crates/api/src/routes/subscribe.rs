//! Newsletter subscription routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{db_error, error_response, parse_id},
};
use herald_db::SubscriberRepository;
use herald_shared::AppError;

/// Creates the subscription routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", get(list_subscribers).post(subscribe))
        .route("/subscribe/{id}", delete(unsubscribe))
}

/// Request body for subscribing.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeRequest {
    /// Subscriber email.
    pub email: Option<String>,
}

/// GET `/subscribe`
async fn list_subscribers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = SubscriberRepository::new(state.db.clone());

    match repo.list().await {
        Ok(subscriptions) if subscriptions.is_empty() => error_response(&AppError::NotFound(
            "There are no subscribers available at the moment".to_string(),
        )),
        Ok(subscriptions) => (
            StatusCode::OK,
            Json(json!({ "nbHits": subscriptions.len(), "subscriptions": subscriptions })),
        )
            .into_response(),
        Err(e) => error_response(&db_error(&e)),
    }
}

/// POST `/subscribe`
async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> impl IntoResponse {
    let Some(email) = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    else {
        return error_response(&AppError::Validation(
            "The email filed cannot be empty".to_string(),
        ));
    };

    let repo = SubscriberRepository::new(state.db.clone());
    match repo.create(email).await {
        Ok(subscriber) => {
            info!(id = %subscriber.id, "Subscriber added");
            (
                StatusCode::OK,
                Json(json!({
                    "msg": "subscription completed successfully",
                    "subscriber": subscriber
                })),
            )
                .into_response()
        }
        Err(e) => error_response(&db_error(&e)),
    }
}

/// DELETE `/subscribe/{id}`
async fn unsubscribe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let repo = SubscriberRepository::new(state.db.clone());
    match repo.delete(id).await {
        Ok(Some(subscriber)) => {
            info!(id = %id, "Subscriber removed");
            (
                StatusCode::OK,
                Json(json!({
                    "msg": "Subscription Deactivated successfully!",
                    "subscriber": subscriber
                })),
            )
                .into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!(
            "A subscription with the id of {raw_id} was not found"
        ))),
        Err(e) => error_response(&db_error(&e)),
    }
}
