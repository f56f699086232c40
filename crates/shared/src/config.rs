//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Object storage settings as read from configuration.
///
/// `provider` selects which of the credential fields are used:
/// `s3` (endpoint, bucket, access_key_id, secret_access_key, region),
/// `azure_blob` (account, access_key, container) or `local` (root).
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider name: `s3`, `azure_blob` or `local`.
    #[serde(default = "default_storage_provider")]
    pub provider: String,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: Option<String>,
    /// S3 access key ID.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// S3 region.
    #[serde(default)]
    pub region: Option<String>,
    /// Azure storage account name.
    #[serde(default)]
    pub account: Option<String>,
    /// Azure storage access key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Azure container name.
    #[serde(default)]
    pub container: Option<String>,
    /// Root directory for the local provider.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Signed download URL TTL in seconds.
    #[serde(default = "default_download_ttl")]
    pub download_ttl_secs: u64,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Signed URLs resolved concurrently for one list page.
    #[serde(default = "default_presign_concurrency")]
    pub presign_concurrency: usize,
    /// Accepted image MIME types; the built-in image list when unset.
    #[serde(default)]
    pub allowed_mime_types: Option<Vec<String>>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: default_storage_provider(),
            endpoint: None,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            region: None,
            account: None,
            access_key: None,
            container: None,
            root: default_storage_root(),
            download_ttl_secs: default_download_ttl(),
            max_file_size: default_max_file_size(),
            presign_concurrency: default_presign_concurrency(),
            allowed_mime_types: None,
        }
    }
}

fn default_storage_provider() -> String {
    "local".to_string()
}

fn default_storage_root() -> String {
    "./uploads".to_string()
}

fn default_download_ttl() -> u64 {
    3600 // 1 hour
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_presign_concurrency() -> usize {
    4
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("HERALD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("HERALD__DATABASE__URL", Some("postgres://localhost/herald")),
                ("HERALD__SERVER__PORT", Some("9000")),
                ("HERALD__STORAGE__PROVIDER", Some("s3")),
                ("HERALD__STORAGE__BUCKET", Some("herald-images")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://localhost/herald");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.storage.provider, "s3");
                assert_eq!(config.storage.bucket.as_deref(), Some("herald-images"));
                assert_eq!(config.storage.download_ttl_secs, 3600);
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars_unset(["HERALD__DATABASE__URL"], || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_storage_defaults() {
        let storage = StorageSettings::default();
        assert_eq!(storage.provider, "local");
        assert_eq!(storage.root, "./uploads");
        assert_eq!(storage.max_file_size, 10 * 1024 * 1024);
        assert_eq!(storage.presign_concurrency, 4);
    }
}
