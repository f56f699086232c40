//! Storage service implementation using Apache OpenDAL.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use opendal::{Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Presigned URL granting time-limited read access to one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
}

/// Object store capabilities the attachment lifecycle relies on.
///
/// Every call is a single remote operation; none of them is retried.
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` with the given content type.
    fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Issue a signed read URL for `key`, valid for `ttl`.
    fn presign_read(
        &self,
        key: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<PresignedUrl, StorageError>> + Send;

    /// Delete the object stored under `key`.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Storage service for content images.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                Operator::new(builder).map(|b| b.finish())
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);
                Operator::new(builder).map(|b| b.finish())
            }
            StorageProvider::Filesystem { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::config("invalid path"))?,
                );
                Operator::new(builder).map(|b| b.finish())
            }
        };

        operator.map_err(|e| StorageError::config(e.to_string()))
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Location of the stored objects.
    #[must_use]
    pub fn location(&self) -> String {
        self.config.provider.location()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl ObjectStore for StorageService {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError> {
        let mut write = self.operator.write_with(key, bytes);
        // The local filesystem backend keeps no object metadata.
        if self.operator.info().full_capability().write_with_content_type {
            write = write.content_type(content_type);
        }
        write.await.map(|_| ()).map_err(StorageError::from)
    }

    async fn presign_read(&self, key: &str, ttl: Duration) -> Result<PresignedUrl, StorageError> {
        let presigned = self
            .operator
            .presign_read(key, ttl)
            .await
            .map_err(StorageError::from)?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }
}
