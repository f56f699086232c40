//! Storage configuration types.

use std::path::PathBuf;
use std::time::Duration;

use herald_shared::config::StorageSettings;

use super::error::StorageError;

/// Where content images are stored.
///
/// Built from [`StorageSettings`] through `StorageConfig::try_from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageProvider {
    /// S3-compatible bucket (AWS S3, Cloudflare R2, DigitalOcean Spaces).
    S3 {
        /// Endpoint URL.
        endpoint: String,
        /// Bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Azure Blob Storage container.
    AzureBlob {
        /// Storage account name.
        account: String,
        /// Storage account key.
        access_key: String,
        /// Container name.
        container: String,
    },
    /// Directory on the local filesystem. Cannot sign URLs.
    Filesystem {
        /// Root directory.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// S3-compatible bucket.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Azure Blob container.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        access_key: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self::AzureBlob {
            account: account.into(),
            access_key: access_key.into(),
            container: container.into(),
        }
    }

    /// Local directory, for development and tests.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::Filesystem { root: root.into() }
    }

    /// Provider name as used in configuration.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::Filesystem { .. } => "local",
        }
    }

    /// Location of the stored objects, for logs: `s3://bucket`,
    /// `azblob://account/container` or the root directory.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::S3 { bucket, .. } => format!("s3://{bucket}"),
            Self::AzureBlob {
                account, container, ..
            } => format!("azblob://{account}/{container}"),
            Self::Filesystem { root } => root.display().to_string(),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Signed download URL TTL in seconds (default: 3600 = 1 hour).
    pub presign_download_ttl_secs: u64,
    /// Signed URLs resolved concurrently for one list page.
    pub presign_concurrency: usize,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;
    /// Default number of signed URLs requested at once for a list page.
    pub const DEFAULT_PRESIGN_CONCURRENCY: usize = 4;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
            presign_concurrency: Self::DEFAULT_PRESIGN_CONCURRENCY,
            allowed_mime_types: Self::default_mime_types(),
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set signed download URL TTL.
    #[must_use]
    pub fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }

    /// Set how many signed URLs a list read requests at once.
    #[must_use]
    pub fn with_presign_concurrency(mut self, concurrency: usize) -> Self {
        self.presign_concurrency = concurrency.max(1);
        self
    }

    /// Set allowed MIME types.
    #[must_use]
    pub fn with_allowed_mime_types(mut self, types: Vec<String>) -> Self {
        self.allowed_mime_types = types;
        self
    }

    /// Default allowed MIME types for content images.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        vec![
            "image/png".to_string(),
            "image/jpeg".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
        ]
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|t| t == mime_type)
    }

    /// Signed download URL TTL as a `Duration`.
    #[must_use]
    pub fn download_ttl(&self) -> Duration {
        Duration::from_secs(self.presign_download_ttl_secs)
    }

    /// Validate an upload against size and MIME type constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.max_file_size {
            return Err(StorageError::too_large(size, self.max_file_size));
        }

        if !self.is_mime_type_allowed(content_type) {
            return Err(StorageError::unsupported_type(content_type));
        }

        Ok(())
    }
}

impl TryFrom<&StorageSettings> for StorageConfig {
    type Error = StorageError;

    fn try_from(settings: &StorageSettings) -> Result<Self, Self::Error> {
        fn required(value: Option<&String>, field: &str) -> Result<String, StorageError> {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| StorageError::config(format!("missing storage.{field}")))
        }

        let provider = match settings.provider.as_str() {
            "s3" => StorageProvider::s3(
                settings
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| "https://s3.amazonaws.com".to_string()),
                required(settings.bucket.as_ref(), "bucket")?,
                required(settings.access_key_id.as_ref(), "access_key_id")?,
                required(settings.secret_access_key.as_ref(), "secret_access_key")?,
                settings
                    .region
                    .clone()
                    .unwrap_or_else(|| "us-east-1".to_string()),
            ),
            "azure_blob" => StorageProvider::azure_blob(
                required(settings.account.as_ref(), "account")?,
                required(settings.access_key.as_ref(), "access_key")?,
                required(settings.container.as_ref(), "container")?,
            ),
            "local" => StorageProvider::local_fs(&settings.root),
            other => {
                return Err(StorageError::config(format!(
                    "unknown storage provider '{other}'"
                )));
            }
        };

        let mut config = Self::new(provider)
            .with_max_file_size(settings.max_file_size)
            .with_download_ttl(settings.download_ttl_secs)
            .with_presign_concurrency(settings.presign_concurrency);
        if let Some(types) = settings.allowed_mime_types.as_ref().filter(|t| !t.is_empty()) {
            config = config.with_allowed_mime_types(types.clone());
        }
        Ok(config)
    }
}
