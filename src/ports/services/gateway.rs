use async_trait::async_trait;

use crate::{
    domain::{
        errors::GatewayResult,
        models::{ObjectMetadata, StoredObject, UploadRequest},
        value_objects::ObjectKey,
    },
    ports::storage::ObjectInfo,
};

/// Port for the object store gateway, consumed by the HTTP handlers.
///
/// Every operation returns a typed result; a gateway whose startup probe
/// failed answers `ClientNotInitialized` to all of them.
#[async_trait]
pub trait UploadGateway: Send + Sync + 'static {
    /// Validate and store an upload, generating a fresh key for it
    async fn upload(&self, request: UploadRequest) -> GatewayResult<StoredObject>;

    /// List the most recently modified objects under the upload folder,
    /// newest first; `limit` defaults to 10
    async fn list_recent(&self, limit: Option<usize>) -> GatewayResult<Vec<ObjectInfo>>;

    /// Look up metadata for a key, normalizing it into the upload folder
    /// when the prefix is missing
    async fn get_metadata(&self, raw_key: &str) -> GatewayResult<(ObjectKey, ObjectMetadata)>;

    /// Delete an object, normalizing the key as for `get_metadata`.
    /// Deleting an absent key surfaces the backend's own error.
    async fn delete(&self, raw_key: &str) -> GatewayResult<ObjectKey>;

    /// Whether the startup probe succeeded
    fn is_ready(&self) -> bool;

    /// The fixed folder segment uploads live under
    fn upload_folder(&self) -> &str;

    /// Public URL for an object: `<endpoint>/<bucket>/<key>`
    fn public_url(&self, key: &ObjectKey) -> String;
}
