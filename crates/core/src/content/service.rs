//! Attachment lifecycle for content records.
//!
//! A record references at most one stored image through `image_name`.
//! Every mutation orders its store and repository calls so that a failure
//! never leaves a record pointing at a missing object:
//!
//! | operation | order                                     |
//! |-----------|-------------------------------------------|
//! | attach    | put new → insert                          |
//! | replace   | put new → delete old → update             |
//! | remove    | delete object → delete record             |
//!
//! The remaining failure windows (repository write failing after a
//! successful store call) leave an orphan object or a stale key; they are
//! logged and not repaired.

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use herald_shared::types::{Page, PageRequest};
use tracing::{info, warn};
use uuid::Uuid;

use super::error::ContentError;
use super::keys::KeyGenerator;
use super::types::{
    ContentInput, ContentPatch, ContentRecord, ContentView, DEFAULT_AUTHOR, MAX_AUTHOR_LEN,
    NewContent, Upload,
};
use crate::storage::{ObjectStore, PresignedUrl, StorageConfig};

/// Repository trait for content persistence.
///
/// One repository instance serves one content kind. It is implemented by
/// the db crate; the store assigns IDs and timestamps.
pub trait ContentRepository: Send + Sync {
    /// Insert a new record.
    fn insert(
        &self,
        input: NewContent,
    ) -> impl Future<Output = Result<ContentRecord, ContentError>> + Send;

    /// Find a record by ID.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;

    /// Fetch one page of records plus the approximate total count.
    fn find_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<ContentRecord>, u64), ContentError>> + Send;

    /// Apply a patch, returning the updated record or `None` if it is gone.
    fn update_by_id(
        &self,
        id: Uuid,
        patch: ContentPatch,
    ) -> impl Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;

    /// Delete a record, returning it or `None` if it was already gone.
    fn delete_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;
}

/// Keeps content records and their stored images consistent.
pub struct AttachmentManager<R: ContentRepository, S: ObjectStore> {
    repo: Arc<R>,
    store: Arc<S>,
    config: StorageConfig,
    keys: Arc<KeyGenerator>,
}

impl<R: ContentRepository, S: ObjectStore> AttachmentManager<R, S> {
    /// Create a new manager with its own key generator.
    #[must_use]
    pub fn new(repo: Arc<R>, store: Arc<S>, config: StorageConfig) -> Self {
        Self::with_key_generator(repo, store, config, Arc::new(KeyGenerator::new()))
    }

    /// Create a new manager sharing `keys` with other managers writing to
    /// the same store.
    #[must_use]
    pub fn with_key_generator(
        repo: Arc<R>,
        store: Arc<S>,
        config: StorageConfig,
        keys: Arc<KeyGenerator>,
    ) -> Self {
        Self {
            repo,
            store,
            config,
            keys,
        }
    }

    /// Create a record, uploading its image first when one is given.
    ///
    /// # Errors
    ///
    /// - `Validation` if title or content is missing, the author is too
    ///   long, or the file is rejected
    /// - `StoreUpload` if the upload fails (nothing is inserted)
    /// - `Persistence` if the insert fails (the uploaded object is orphaned)
    pub async fn attach(
        &self,
        input: ContentInput,
        upload: Option<Upload>,
    ) -> Result<ContentRecord, ContentError> {
        let (Some(title), Some(content)) = (input.title(), input.content()) else {
            return Err(ContentError::validation("Title and content are required"));
        };
        validate_author(&input)?;
        if let Some(upload) = &upload {
            self.validate_upload(upload)?;
        }

        let image_name = match upload {
            Some(upload) => Some(self.store_upload(upload).await?),
            None => None,
        };

        let new = NewContent {
            title,
            content,
            author: input.author().unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            image_name: image_name.clone(),
        };

        match self.repo.insert(new).await {
            Ok(record) => {
                info!(id = %record.id, image = ?record.image_name, "Content created");
                Ok(record)
            }
            Err(e) => {
                if let Some(key) = image_name {
                    warn!(key = %key, error = %e, "Insert failed after upload, object orphaned");
                }
                Err(e)
            }
        }
    }

    /// Fetch one record with its signed image URL.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this ID, or `Persistence`.
    pub async fn get(&self, id: Uuid) -> Result<ContentView, ContentError> {
        let record = self.find_existing(id).await?;
        Ok(self.resolve_view(record).await)
    }

    /// Fetch one page of records with their signed image URLs.
    ///
    /// URLs are requested at most `presign_concurrency` at a time and the
    /// page order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the page cannot be read.
    pub async fn list(&self, request: PageRequest) -> Result<Page<ContentView>, ContentError> {
        let (records, total) = self
            .repo
            .find_page(request.offset(), request.limit)
            .await?;

        let concurrency = self
            .config
            .presign_concurrency
            .clamp(1, records.len().max(1));
        let views: Vec<ContentView> = stream::iter(records)
            .map(|record| self.resolve_view(record))
            .buffered(concurrency)
            .collect()
            .await;

        Ok(Page::new(views, request, total))
    }

    /// Attach a signed image URL to a record when it has an image.
    ///
    /// A failure to sign is logged and yields a view without URL; it never
    /// fails the read.
    pub async fn resolve_view(&self, record: ContentRecord) -> ContentView {
        match self.signed_url(&record).await {
            Ok(url) => ContentView {
                image_url: url.map(|u| u.url),
                record,
            },
            Err(e) => {
                warn!(id = %record.id, error = %e, "Serving content without image URL");
                ContentView::without_url(record)
            }
        }
    }

    /// Signed read URL for the record's image, `None` when it has none.
    ///
    /// # Errors
    ///
    /// Returns `StoreUrl` if the store cannot sign the URL.
    pub async fn signed_url(
        &self,
        record: &ContentRecord,
    ) -> Result<Option<PresignedUrl>, ContentError> {
        let Some(key) = record.image_name.as_deref() else {
            return Ok(None);
        };

        self.store
            .presign_read(key, self.config.download_ttl())
            .await
            .map(Some)
            .map_err(ContentError::StoreUrl)
    }

    /// Update a record's text fields and optionally swap its image.
    ///
    /// Missing or blank fields keep their stored value. A new image is
    /// uploaded before the old one is deleted, and both happen before the
    /// record is updated.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this ID
    /// - `Validation` if the author is too long or the file is rejected
    /// - `StoreUpload` if the new upload fails (old object and record untouched)
    /// - `StoreDelete` if the old object cannot be deleted (record untouched)
    /// - `Persistence` if the update fails
    pub async fn replace(
        &self,
        id: Uuid,
        input: ContentInput,
        upload: Option<Upload>,
    ) -> Result<ContentRecord, ContentError> {
        let existing = self.find_existing(id).await?;
        validate_author(&input)?;
        if let Some(upload) = &upload {
            self.validate_upload(upload)?;
        }

        let new_key = match upload {
            Some(upload) => {
                if existing.image_name.is_none() {
                    info!(id = %id, "Record has no image yet, uploading a new one");
                }
                let key = self.store_upload(upload).await?;
                if let Some(old) = existing.image_name.as_deref() {
                    if let Err(e) = self.store.delete(old).await {
                        warn!(id = %id, key = %key, "Old image delete failed, new object orphaned");
                        return Err(ContentError::StoreDelete(e));
                    }
                }
                Some(key)
            }
            None => None,
        };

        let patch = ContentPatch {
            title: input.title().unwrap_or(existing.title),
            content: input.content().unwrap_or(existing.content),
            author: input.author().unwrap_or(existing.author),
            image_name: new_key.clone(),
        };

        match self.repo.update_by_id(id, patch).await {
            Ok(Some(record)) => {
                info!(id = %id, image = ?record.image_name, "Content updated");
                Ok(record)
            }
            Ok(None) => {
                if let Some(key) = new_key {
                    warn!(id = %id, key = %key, "Record vanished during update, object orphaned");
                }
                Err(ContentError::not_found(id))
            }
            Err(e) => {
                if let Some(key) = new_key {
                    warn!(id = %id, key = %key, error = %e, "Update failed after image swap, record is stale");
                }
                Err(e)
            }
        }
    }

    /// Delete a record and its image, image first.
    ///
    /// Returns the record as it was before deletion.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this ID
    /// - `StoreDelete` if the image cannot be deleted (record kept)
    /// - `Persistence` if the record delete fails
    pub async fn remove(&self, id: Uuid) -> Result<ContentRecord, ContentError> {
        let existing = self.find_existing(id).await?;

        if let Some(key) = existing.image_name.as_deref() {
            self.store
                .delete(key)
                .await
                .map_err(ContentError::StoreDelete)?;
        }

        match self.repo.delete_by_id(id).await? {
            Some(_) => {
                info!(id = %id, "Content deleted");
                Ok(existing)
            }
            None => Err(ContentError::not_found(id)),
        }
    }

    async fn find_existing(&self, id: Uuid) -> Result<ContentRecord, ContentError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ContentError::not_found(id))
    }

    fn validate_upload(&self, upload: &Upload) -> Result<(), ContentError> {
        self.config
            .validate_upload(&upload.content_type, upload.size())
            .map_err(|e| ContentError::validation(e.to_string()))
    }

    async fn store_upload(&self, upload: Upload) -> Result<String, ContentError> {
        let key = self.keys.next_key(&upload.filename);
        self.store
            .put(&key, upload.bytes, &upload.content_type)
            .await
            .map_err(ContentError::StoreUpload)?;
        Ok(key)
    }
}

fn validate_author(input: &ContentInput) -> Result<(), ContentError> {
    match input.author() {
        Some(author) if author.chars().count() > MAX_AUTHOR_LEN => Err(ContentError::validation(
            format!("Author must be at most {MAX_AUTHOR_LEN} characters"),
        )),
        _ => Ok(()),
    }
}
