use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    domain::{
        errors::{GatewayError, GatewayResult},
        models::{ObjectMetadata, StoredObject, UploadRequest},
        value_objects::{KeyGenerator, ObjectKey, UploadPolicy},
    },
    ports::{
        services::UploadGateway,
        storage::{ObjectInfo, ObjectStore},
    },
};

/// Listing cap applied when the caller does not pass one
pub const DEFAULT_LIST_LIMIT: usize = 10;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Implementation of the object store gateway.
///
/// Connectivity is checked once, eagerly, at construction. A failed probe
/// leaves the gateway in a permanent not-initialized state: the process stays
/// up, `/health` reports it, and every operation answers
/// `ClientNotInitialized` until restart.
pub struct GatewayServiceImpl {
    store: Option<Arc<dyn ObjectStore>>,
    probe_error: Option<String>,
    policy: UploadPolicy,
    keygen: KeyGenerator,
    public_base: String,
}

impl GatewayServiceImpl {
    /// Build the gateway, probing the backend once
    pub async fn connect(
        store: Arc<dyn ObjectStore>,
        policy: UploadPolicy,
        keygen: KeyGenerator,
        public_base: String,
    ) -> Self {
        match store.probe(keygen.folder()).await {
            Ok(()) => Self {
                store: Some(store),
                probe_error: None,
                policy,
                keygen,
                public_base,
            },
            Err(e) => {
                warn!(error = %e, "object store probe failed; all operations will be rejected");
                Self {
                    store: None,
                    probe_error: Some(e.to_string()),
                    policy,
                    keygen,
                    public_base,
                }
            }
        }
    }

    /// The recorded probe failure, if the gateway is degraded
    pub fn probe_error(&self) -> Option<&str> {
        self.probe_error.as_deref()
    }

    fn store(&self) -> GatewayResult<&Arc<dyn ObjectStore>> {
        self.store
            .as_ref()
            .ok_or(GatewayError::ClientNotInitialized)
    }
}

#[async_trait]
impl UploadGateway for GatewayServiceImpl {
    async fn upload(&self, request: UploadRequest) -> GatewayResult<StoredObject> {
        let store = self.store()?;

        // Reject before the backend sees anything
        self.policy
            .check(&request.filename, request.data.len() as u64)?;

        let key = self.keygen.generate(&request.filename)?;
        let content_type = request
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let uploaded_at = Utc::now();
        let mut metadata = HashMap::new();
        metadata.insert(
            "original_filename".to_string(),
            request.filename.clone(),
        );
        metadata.insert("upload_timestamp".to_string(), uploaded_at.to_rfc3339());

        let size = request.data.len() as u64;
        store
            .put_object(&key, request.data, &content_type, &metadata)
            .await?;

        debug!(key = %key, size, "stored uploaded object");

        Ok(StoredObject {
            key,
            original_filename: request.filename,
            size,
            content_type,
            uploaded_at,
            metadata,
        })
    }

    async fn list_recent(&self, limit: Option<usize>) -> GatewayResult<Vec<ObjectInfo>> {
        let store = self.store()?;
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);

        let mut entries = store.list_objects(self.keygen.folder(), limit).await?;
        entries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        entries.truncate(limit);

        Ok(entries)
    }

    async fn get_metadata(&self, raw_key: &str) -> GatewayResult<(ObjectKey, ObjectMetadata)> {
        let store = self.store()?;
        let key = ObjectKey::with_folder(raw_key, self.keygen.folder())?;
        let metadata = store.head_object(&key).await?;
        Ok((key, metadata))
    }

    async fn delete(&self, raw_key: &str) -> GatewayResult<ObjectKey> {
        let store = self.store()?;
        let key = ObjectKey::with_folder(raw_key, self.keygen.folder())?;
        store.delete_object(&key).await?;
        debug!(key = %key, "deleted object");
        Ok(key)
    }

    fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    fn upload_folder(&self) -> &str {
        self.keygen.folder()
    }

    fn public_url(&self, key: &ObjectKey) -> String {
        format!("{}/{}", self.public_base, key.as_str())
    }
}
