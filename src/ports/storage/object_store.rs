use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    errors::GatewayResult,
    models::ObjectMetadata,
    value_objects::ObjectKey,
};

/// Port for the S3-compatible storage backend.
/// This abstracts the actual backend (MinIO, AWS S3, in-memory, ...).
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store a fully buffered payload with its content type and custom
    /// metadata map
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Vec<u8>,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> GatewayResult<()>;

    /// Fetch size, content type, last-modified and custom metadata for
    /// exactly this key, without the payload
    async fn head_object(&self, key: &ObjectKey) -> GatewayResult<ObjectMetadata>;

    /// Delete an object
    async fn delete_object(&self, key: &ObjectKey) -> GatewayResult<()>;

    /// List up to `max_results` objects under a folder, excluding the folder
    /// marker itself
    async fn list_objects(&self, folder: &str, max_results: usize)
        -> GatewayResult<Vec<ObjectInfo>>;

    /// Lightweight connectivity check against the configured bucket; an empty
    /// folder is a success, an unreachable or missing bucket is not
    async fn probe(&self, folder: &str) -> GatewayResult<()>;
}

/// Information about an object in a listing
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub key: ObjectKey,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub e_tag: Option<String>,
}
