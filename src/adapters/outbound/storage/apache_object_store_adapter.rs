use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, GetOptions,
    ObjectStore as ApacheObjectStore, PutOptions, PutPayload,
};

use crate::{
    domain::{
        errors::{GatewayError, GatewayResult},
        models::ObjectMetadata,
        value_objects::ObjectKey,
    },
    ports::storage::{ObjectInfo, ObjectStore},
};

/// Adapter that implements the storage port using Apache `object_store`.
///
/// Works against any backend the crate supports; this service uses the AWS
/// implementation for MinIO/S3 and the in-memory one for tests.
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { inner: store }
    }
}

/// Translate a backend error into the gateway taxonomy.
///
/// Applied at every call site rather than as a blanket catch; `key` is the
/// object the operation addressed, when it addressed one.
fn map_store_error(err: object_store::Error, key: Option<&ObjectKey>) -> GatewayError {
    match &err {
        object_store::Error::NotFound { .. } => match key {
            Some(key) => GatewayError::NotFound { key: key.clone() },
            None => GatewayError::BackendError {
                message: err.to_string(),
            },
        },
        object_store::Error::Unauthenticated { .. } => GatewayError::MissingCredentials,
        object_store::Error::PermissionDenied { .. } => GatewayError::AccessDenied {
            message: err.to_string(),
        },
        _ => {
            let message = err.to_string();
            // The AWS implementation reports a missing bucket as a generic
            // error carrying the S3 error code
            if message.contains("NoSuchBucket") {
                GatewayError::NoSuchBucket { message }
            } else {
                GatewayError::BackendError { message }
            }
        }
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Vec<u8>,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> GatewayResult<()> {
        let path = ObjectPath::from(key.as_str());
        let payload = PutPayload::from(Bytes::from(data));

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        for (name, value) in metadata {
            attributes.insert(
                Attribute::Metadata(Cow::Owned(name.clone())),
                value.clone().into(),
            );
        }

        let mut options = PutOptions::default();
        options.attributes = attributes;

        self.inner
            .put_opts(&path, payload, options)
            .await
            .map_err(|e| map_store_error(e, Some(key)))?;

        Ok(())
    }

    async fn head_object(&self, key: &ObjectKey) -> GatewayResult<ObjectMetadata> {
        let path = ObjectPath::from(key.as_str());

        // A HEAD via get_opts also carries the object attributes, which a
        // plain head() does not
        let mut options = GetOptions::default();
        options.head = true;

        let result = self
            .inner
            .get_opts(&path, options)
            .await
            .map_err(|e| map_store_error(e, Some(key)))?;

        let mut content_type = None;
        let mut custom_metadata = HashMap::new();
        for (attribute, value) in result.attributes.iter() {
            match attribute {
                Attribute::ContentType => content_type = Some(value.to_string()),
                Attribute::Metadata(name) => {
                    custom_metadata.insert(name.to_string(), value.to_string());
                }
                _ => {}
            }
        }

        Ok(ObjectMetadata {
            content_type,
            content_length: result.meta.size,
            e_tag: result.meta.e_tag.clone(),
            last_modified: result.meta.last_modified,
            custom_metadata,
        })
    }

    async fn delete_object(&self, key: &ObjectKey) -> GatewayResult<()> {
        let path = ObjectPath::from(key.as_str());

        self.inner
            .delete(&path)
            .await
            .map_err(|e| map_store_error(e, Some(key)))?;

        Ok(())
    }

    async fn list_objects(
        &self,
        folder: &str,
        max_results: usize,
    ) -> GatewayResult<Vec<ObjectInfo>> {
        let prefix = ObjectPath::from(folder);

        let mut stream = self.inner.list(Some(&prefix));
        let mut objects = Vec::new();

        while let Some(entry) = stream.next().await {
            if objects.len() >= max_results {
                break;
            }

            let meta = entry.map_err(|e| map_store_error(e, None))?;

            // Skip the folder marker some backends materialize for the prefix
            if meta.location.as_ref().trim_end_matches('/') == folder {
                continue;
            }

            let key = ObjectKey::new(meta.location.to_string()).map_err(|e| {
                GatewayError::BackendError {
                    message: format!("Backend returned an invalid key: {}", e),
                }
            })?;

            objects.push(ObjectInfo {
                key,
                size: meta.size,
                last_modified: meta.last_modified,
                e_tag: meta.e_tag,
            });
        }

        Ok(objects)
    }

    async fn probe(&self, folder: &str) -> GatewayResult<()> {
        let prefix = ObjectPath::from(folder);

        // Reading the first listing entry is enough to establish that the
        // bucket exists and the credentials work; an empty folder is fine
        let mut stream = self.inner.list(Some(&prefix));
        match stream.next().await {
            None | Some(Ok(_)) => Ok(()),
            Some(Err(object_store::Error::NotFound { .. })) => Ok(()),
            Some(Err(e)) => Err(map_store_error(e, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn adapter() -> ApacheObjectStoreAdapter {
        ApacheObjectStoreAdapter::new(Arc::new(InMemory::new()))
    }

    fn key(s: &str) -> ObjectKey {
        ObjectKey::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_head_roundtrips_attributes() {
        let adapter = adapter();
        let key = key("docs/a.txt");

        let mut metadata = HashMap::new();
        metadata.insert("original_filename".to_string(), "a.txt".to_string());

        adapter
            .put_object(&key, b"hello".to_vec(), "text/plain", &metadata)
            .await
            .unwrap();

        let meta = adapter.head_object(&key).await.unwrap();
        assert_eq!(meta.content_length, 5);
        assert_eq!(meta.content_type.as_deref(), Some("text/plain"));
        assert_eq!(
            meta.custom_metadata.get("original_filename").map(String::as_str),
            Some("a.txt")
        );
    }

    #[tokio::test]
    async fn test_head_missing_key_is_not_found() {
        let adapter = adapter();
        let missing = key("docs/missing.txt");

        match adapter.head_object(&missing).await {
            Err(GatewayError::NotFound { key }) => assert_eq!(key, missing),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_confined_to_folder_and_capped() {
        let adapter = adapter();
        let empty = HashMap::new();

        for i in 0..5 {
            adapter
                .put_object(
                    &key(&format!("docs/file{i}.txt")),
                    b"x".to_vec(),
                    "text/plain",
                    &empty,
                )
                .await
                .unwrap();
        }
        adapter
            .put_object(&key("other/file.txt"), b"x".to_vec(), "text/plain", &empty)
            .await
            .unwrap();

        let listed = adapter.list_objects("docs", 3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|o| o.key.has_prefix("docs/")));
    }

    #[tokio::test]
    async fn test_probe_empty_store_succeeds() {
        let adapter = adapter();
        assert!(adapter.probe("docs").await.is_ok());
    }
}
