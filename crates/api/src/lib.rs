//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for blog posts, news, contact messages and subscribers
//! - Multipart form parsing for content uploads
//! - Error to response mapping

pub mod error;
pub mod form;
pub mod routes;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use herald_core::content::{AttachmentManager, ContentKind, KeyGenerator};
use herald_core::storage::StorageService;
use herald_db::PostRepository;

/// Attachment manager backed by the posts table and the configured store.
pub type ContentManager = AttachmentManager<PostRepository, StorageService>;

/// Multipart overhead allowed on top of the largest accepted file.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Object store holding content images.
    pub storage: Arc<StorageService>,
    /// Blog post manager.
    pub blogs: Arc<ContentManager>,
    /// News item manager.
    pub news: Arc<ContentManager>,
}

impl AppState {
    /// Wires the content managers to `db` and `storage`.
    ///
    /// Both managers share one key generator since they write to the same
    /// store.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, storage: StorageService) -> Self {
        let db = db.into();
        let config = storage.config().clone();
        let storage = Arc::new(storage);
        let keys = Arc::new(KeyGenerator::new());

        let manager = |kind| {
            Arc::new(AttachmentManager::with_key_generator(
                Arc::new(PostRepository::new(db.clone(), kind)),
                storage.clone(),
                config.clone(),
                keys.clone(),
            ))
        };
        let blogs = manager(ContentKind::Blog);
        let news = manager(ContentKind::News);

        Self {
            db,
            storage,
            blogs,
            news,
        }
    }

    /// Manager for one content kind.
    #[must_use]
    pub fn manager(&self, kind: ContentKind) -> &ContentManager {
        match kind {
            ContentKind::Blog => &self.blogs,
            ContentKind::News => &self.news,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let max_file_size = usize::try_from(state.storage.config().max_file_size).unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(
            max_file_size.saturating_add(FORM_OVERHEAD_BYTES),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "msg": "API working perfectly" }))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "msg": "The route you are looking for does not exist" })),
    )
}
