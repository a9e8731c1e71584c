use object_store::{aws::AmazonS3Builder, memory::InMemory, ObjectStore as ApacheObjectStore};
use std::sync::Arc;

use crate::{
    adapters::outbound::storage::ApacheObjectStoreAdapter,
    domain::value_objects::{KeyGenerator, UploadPolicy},
    services::GatewayServiceImpl,
};

/// Fixed folder segment all uploads live under
pub const DEFAULT_UPLOAD_FOLDER: &str = "docs";

/// Default upload cap (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub upload_folder: String,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3 {
        bucket: String,
        region: String,
        access_key: Option<String>,
        secret_key: Option<String>,
    },
    MinIO {
        endpoint: String,
        bucket: String,
        access_key: String,
        secret_key: String,
        use_ssl: bool,
    },
}

impl StorageBackend {
    /// Endpoint and bucket labels surfaced by `/health` and public URLs
    fn public_identity(&self) -> (String, String) {
        match self {
            StorageBackend::InMemory => {
                ("memory://localhost".to_string(), "in-memory".to_string())
            }
            StorageBackend::S3 { bucket, region, .. } => (
                format!("https://s3.{}.amazonaws.com", region),
                bucket.clone(),
            ),
            StorageBackend::MinIO {
                endpoint, bucket, ..
            } => (endpoint.clone(), bucket.clone()),
        }
    }
}

/// Runtime settings the HTTP layer needs alongside the gateway
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub bucket: String,
    pub upload_folder: String,
    pub max_upload_bytes: u64,
}

/// The built application: one gateway instance plus its settings
pub struct AppServices {
    pub gateway: GatewayServiceImpl,
    pub settings: ServiceSettings,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_upload_folder(mut self, folder: impl Into<String>) -> Self {
        self.config.upload_folder = folder.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.config.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Build the gateway and settings; the gateway probes its backend once
    /// during this call
    pub async fn build(self) -> Result<AppServices, AppError> {
        let store = self.create_store()?;
        let adapter = Arc::new(ApacheObjectStoreAdapter::new(store));

        let (endpoint, bucket) = self.config.storage_backend.public_identity();
        let settings = ServiceSettings {
            endpoint: endpoint.clone(),
            bucket: bucket.clone(),
            upload_folder: self.config.upload_folder.clone(),
            max_upload_bytes: self.config.max_upload_bytes,
        };

        let policy = UploadPolicy::default().with_max_payload_bytes(self.config.max_upload_bytes);
        let keygen = KeyGenerator::new(self.config.upload_folder.clone());
        let public_base = format!("{}/{}", endpoint, bucket);

        let gateway = GatewayServiceImpl::connect(adapter, policy, keygen, public_base).await;

        Ok(AppServices { gateway, settings })
    }

    /// Create the backend store based on configuration
    fn create_store(&self) -> Result<Arc<dyn ApacheObjectStore>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemory::new())),
            StorageBackend::S3 {
                bucket,
                region,
                access_key,
                secret_key,
            } => {
                let mut builder = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket.as_str())
                    .with_region(region.as_str());

                if let Some(access_key) = access_key {
                    builder = builder.with_access_key_id(access_key.as_str());
                }
                if let Some(secret_key) = secret_key {
                    builder = builder.with_secret_access_key(secret_key.as_str());
                }

                let store = builder.build().map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?;
                Ok(Arc::new(store))
            }
            StorageBackend::MinIO {
                endpoint,
                bucket,
                access_key,
                secret_key,
                use_ssl,
            } => {
                let store = AmazonS3Builder::new()
                    .with_endpoint(endpoint.as_str())
                    .with_bucket_name(bucket.as_str())
                    .with_access_key_id(access_key.as_str())
                    .with_secret_access_key(secret_key.as_str())
                    .with_region("us-east-1")
                    .with_allow_http(!use_ssl)
                    .with_virtual_hosted_style_request(false)
                    .build()
                    .map_err(|e| AppError::StorageInit {
                        message: e.to_string(),
                    })?;
                Ok(Arc::new(store))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new().build().await
}

/// Create an application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
        Ok("s3") => {
            let bucket = std::env::var("S3_BUCKET").map_err(|_| AppError::Configuration {
                message: "S3_BUCKET environment variable required".to_string(),
            })?;
            let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());

            StorageBackend::S3 {
                bucket,
                region,
                access_key: std::env::var("S3_ACCESS_KEY").ok(),
                secret_key: std::env::var("S3_SECRET_KEY").ok(),
            }
        }
        Ok("minio") => {
            let endpoint = std::env::var("S3_ENDPOINT").map_err(|_| AppError::Configuration {
                message: "S3_ENDPOINT environment variable required".to_string(),
            })?;
            let bucket = std::env::var("S3_BUCKET").map_err(|_| AppError::Configuration {
                message: "S3_BUCKET environment variable required".to_string(),
            })?;
            let access_key =
                std::env::var("S3_ACCESS_KEY").map_err(|_| AppError::Configuration {
                    message: "S3_ACCESS_KEY environment variable required".to_string(),
                })?;
            let secret_key =
                std::env::var("S3_SECRET_KEY").map_err(|_| AppError::Configuration {
                    message: "S3_SECRET_KEY environment variable required".to_string(),
                })?;
            let use_ssl = std::env::var("MINIO_USE_SSL")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false);

            StorageBackend::MinIO {
                endpoint,
                bucket,
                access_key,
                secret_key,
                use_ssl,
            }
        }
        _ => StorageBackend::InMemory,
    };

    let upload_folder =
        std::env::var("UPLOAD_FOLDER").unwrap_or_else(|_| DEFAULT_UPLOAD_FOLDER.to_string());
    let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    AppBuilder::new()
        .with_storage_backend(storage_backend)
        .with_upload_folder(upload_folder)
        .with_max_upload_bytes(max_upload_bytes)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::services::UploadGateway;

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let services = create_in_memory_app().await.unwrap();

        assert!(services.gateway.is_ready());
        assert_eq!(services.settings.upload_folder, DEFAULT_UPLOAD_FOLDER);
        assert_eq!(services.settings.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[tokio::test]
    async fn test_app_builder_overrides() {
        let services = AppBuilder::new()
            .with_storage_backend(StorageBackend::InMemory)
            .with_upload_folder("scratch")
            .with_max_upload_bytes(1024)
            .build()
            .await
            .unwrap();

        assert_eq!(services.gateway.upload_folder(), "scratch");
        assert_eq!(services.settings.max_upload_bytes, 1024);
    }
}
