//! Blog and news routes.
//!
//! Both resources share the same handlers and differ only in their paths,
//! upload field and JSON keys, described by a [`Resource`].

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::{
    AppState,
    error::{content_error, error_response, parse_id},
    form::ContentForm,
};
use herald_core::content::ContentKind;
use herald_shared::AppError;
use herald_shared::types::{PageMeta, PageRequest};

/// Wire description of a content resource.
#[derive(Debug)]
pub struct Resource {
    /// Content kind served.
    pub kind: ContentKind,
    /// Path segment under `/api/v1`.
    pub path: &'static str,
    /// Key of a single record in read and delete responses.
    pub one: &'static str,
    /// Key of the record list.
    pub many: &'static str,
    /// Key of the record in create responses.
    pub created: &'static str,
    /// Key of the record in update responses.
    pub updated: &'static str,
    /// Message returned on create.
    pub created_msg: &'static str,
    /// Message returned on update.
    pub updated_msg: &'static str,
    /// Message returned on delete.
    pub deleted_msg: &'static str,
    /// Message returned when a list page is empty.
    pub empty_msg: &'static str,
}

/// Blog posts.
pub static BLOG: Resource = Resource {
    kind: ContentKind::Blog,
    path: "blog",
    one: "blog",
    many: "blogs",
    created: "blog",
    updated: "updatedBlog",
    created_msg: "Blog created successfully",
    updated_msg: "Blog updated successfully",
    deleted_msg: "blog deleted successfully",
    empty_msg: "There are no blogs available at the moment",
};

/// News items.
pub static NEWS: Resource = Resource {
    kind: ContentKind::News,
    path: "news",
    one: "newsItem",
    many: "news",
    created: "news",
    updated: "updatedNews",
    created_msg: "News created successfully",
    updated_msg: "News item updated successfully",
    deleted_msg: "newsItem deleted successfully",
    empty_msg: "There are no news available at the moment",
};

/// Creates the routes of one content resource.
pub fn routes(resource: &'static Resource) -> Router<AppState> {
    let collection = format!("/{}", resource.path);
    let item = format!("/{}/{{id}}", resource.path);

    Router::new()
        .route(
            &collection,
            get(move |state: State<AppState>, query: Query<ListQuery>| {
                list_content(resource, state, query)
            })
            .post(move |state: State<AppState>, request: Request| {
                create_content(resource, state, request)
            }),
        )
        .route(
            &item,
            get(move |state: State<AppState>, id: Path<String>| {
                get_content(resource, state, id)
            })
            .patch(
                move |state: State<AppState>, id: Path<String>, request: Request| {
                    update_content(resource, state, id, request)
                },
            )
            .delete(move |state: State<AppState>, id: Path<String>| {
                delete_content(resource, state, id)
            }),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for list endpoints.
///
/// Kept as raw strings so that unparsable values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

/// Build `{ msg?, <key>: value }`.
fn envelope<T: Serialize>(
    msg: Option<&str>,
    key: &str,
    value: &T,
) -> Result<Map<String, Value>, AppError> {
    let mut body = Map::new();
    if let Some(msg) = msg {
        body.insert("msg".to_string(), Value::from(msg));
    }
    let value =
        serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))?;
    body.insert(key.to_string(), value);
    Ok(body)
}

fn with_meta(mut body: Map<String, Value>, meta: PageMeta) -> Map<String, Value> {
    body.insert("nbHits".to_string(), Value::from(meta.nb_hits));
    body.insert("totalPages".to_string(), Value::from(meta.total_pages));
    body.insert("currentPage".to_string(), Value::from(meta.current_page));
    body
}

fn respond(status: StatusCode, body: Result<Map<String, Value>, AppError>) -> Response {
    match body {
        Ok(body) => (status, Json(Value::Object(body))).into_response(),
        Err(e) => error_response(&e),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/{resource}`
/// One page of records with signed image URLs.
async fn list_content(
    resource: &'static Resource,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let request = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    match state.manager(resource.kind).list(request).await {
        Ok(page) if page.is_empty() => {
            error_response(&AppError::NotFound(resource.empty_msg.to_string()))
        }
        Ok(page) => respond(
            StatusCode::OK,
            envelope(None, resource.many, &page.items).map(|body| with_meta(body, page.meta)),
        ),
        Err(e) => error_response(&content_error(resource.kind, e)),
    }
}

/// GET `/{resource}/{id}`
/// One record with its signed image URL.
async fn get_content(
    resource: &'static Resource,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.manager(resource.kind).get(id).await {
        Ok(view) => respond(StatusCode::OK, envelope(None, resource.one, &view)),
        Err(e) => error_response(&content_error(resource.kind, e)),
    }
}

/// POST `/{resource}`
/// Create a record from a multipart, JSON or urlencoded body, uploading
/// its image first.
async fn create_content(
    resource: &'static Resource,
    State(state): State<AppState>,
    request: Request,
) -> impl IntoResponse {
    let form = match ContentForm::from_request(request, resource.kind.upload_field()).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    match state
        .manager(resource.kind)
        .attach(form.input, form.image)
        .await
    {
        Ok(record) => {
            info!(id = %record.id, kind = resource.kind.as_str(), "Content created");
            respond(
                StatusCode::CREATED,
                envelope(Some(resource.created_msg), resource.created, &record),
            )
        }
        Err(e) => {
            error!(kind = resource.kind.as_str(), error = %e, "Failed to create content");
            error_response(&content_error(resource.kind, e))
        }
    }
}

/// PATCH `/{resource}/{id}`
/// Update text fields and optionally swap the image.
async fn update_content(
    resource: &'static Resource,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    request: Request,
) -> impl IntoResponse {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let form = match ContentForm::from_request(request, resource.kind.upload_field()).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    match state
        .manager(resource.kind)
        .replace(id, form.input, form.image)
        .await
    {
        Ok(record) => {
            info!(id = %id, kind = resource.kind.as_str(), "Content updated");
            respond(
                StatusCode::OK,
                envelope(Some(resource.updated_msg), resource.updated, &record),
            )
        }
        Err(e) => {
            error!(id = %id, error = %e, "Failed to update content");
            error_response(&content_error(resource.kind, e))
        }
    }
}

/// DELETE `/{resource}/{id}`
/// Delete the image, then the record.
async fn delete_content(
    resource: &'static Resource,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.manager(resource.kind).remove(id).await {
        Ok(record) => {
            info!(id = %id, kind = resource.kind.as_str(), "Content deleted");
            respond(
                StatusCode::OK,
                envelope(Some(resource.deleted_msg), resource.one, &record),
            )
        }
        Err(e) => {
            error!(id = %id, error = %e, "Failed to delete content");
            error_response(&content_error(resource.kind, e))
        }
    }
}
