//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod contact;
pub mod content;
pub mod health;
pub mod subscribe;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(content::routes(&content::BLOG))
        .merge(content::routes(&content::NEWS))
        .merge(contact::routes())
        .merge(subscribe::routes())
}
