use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use object_store::memory::InMemory;
use upload_gateway::{
    ApacheObjectStoreAdapter, GatewayError, GatewayResult, GatewayServiceImpl, KeyGenerator,
    ObjectInfo, ObjectKey, ObjectMetadata, ObjectStore, UploadGateway, UploadPolicy,
    UploadRequest,
};

async fn in_memory_gateway() -> GatewayServiceImpl {
    let adapter = Arc::new(ApacheObjectStoreAdapter::new(Arc::new(InMemory::new())));
    GatewayServiceImpl::connect(
        adapter,
        UploadPolicy::default(),
        KeyGenerator::new("docs"),
        "http://localhost:9000/test-bucket".to_string(),
    )
    .await
}

fn upload_request(filename: &str, data: &[u8]) -> UploadRequest {
    UploadRequest {
        data: data.to_vec(),
        filename: filename.to_string(),
        content_type: Some("application/octet-stream".to_string()),
    }
}

/// Storage port double that counts backend calls and answers nothing useful
struct CountingStore {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ObjectStore for CountingStore {
    async fn put_object(
        &self,
        _key: &ObjectKey,
        _data: Vec<u8>,
        _content_type: &str,
        _metadata: &HashMap<String, String>,
    ) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn head_object(&self, key: &ObjectKey) -> GatewayResult<ObjectMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::NotFound { key: key.clone() })
    }

    async fn delete_object(&self, _key: &ObjectKey) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_objects(
        &self,
        _folder: &str,
        _max_results: usize,
    ) -> GatewayResult<Vec<ObjectInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn probe(&self, _folder: &str) -> GatewayResult<()> {
        Ok(())
    }
}

/// Storage port double whose probe always fails
struct UnreachableStore;

#[async_trait]
impl ObjectStore for UnreachableStore {
    async fn put_object(
        &self,
        _key: &ObjectKey,
        _data: Vec<u8>,
        _content_type: &str,
        _metadata: &HashMap<String, String>,
    ) -> GatewayResult<()> {
        panic!("backend must not be reached");
    }

    async fn head_object(&self, _key: &ObjectKey) -> GatewayResult<ObjectMetadata> {
        panic!("backend must not be reached");
    }

    async fn delete_object(&self, _key: &ObjectKey) -> GatewayResult<()> {
        panic!("backend must not be reached");
    }

    async fn list_objects(
        &self,
        _folder: &str,
        _max_results: usize,
    ) -> GatewayResult<Vec<ObjectInfo>> {
        panic!("backend must not be reached");
    }

    async fn probe(&self, _folder: &str) -> GatewayResult<()> {
        Err(GatewayError::BackendError {
            message: "connection refused".to_string(),
        })
    }
}

#[tokio::test]
async fn test_rejected_upload_never_contacts_backend() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = Arc::new(CountingStore {
        calls: calls.clone(),
    });
    let gateway = GatewayServiceImpl::connect(
        store,
        UploadPolicy::default(),
        KeyGenerator::new("docs"),
        "http://localhost:9000/test-bucket".to_string(),
    )
    .await;

    let result = gateway.upload(upload_request("malware.exe", b"MZ")).await;
    assert!(matches!(
        result,
        Err(GatewayError::ValidationFailed { .. })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let result = gateway
        .upload(upload_request("big.pdf", &vec![0u8; 32][..]))
        .await;
    assert!(result.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_oversize_upload_never_contacts_backend() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = Arc::new(CountingStore {
        calls: calls.clone(),
    });
    let gateway = GatewayServiceImpl::connect(
        store,
        UploadPolicy::default().with_max_payload_bytes(4),
        KeyGenerator::new("docs"),
        "http://localhost:9000/test-bucket".to_string(),
    )
    .await;

    let result = gateway.upload(upload_request("a.pdf", b"12345")).await;
    assert!(matches!(
        result,
        Err(GatewayError::ValidationFailed { .. })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_probe_leaves_gateway_degraded() {
    let gateway = GatewayServiceImpl::connect(
        Arc::new(UnreachableStore),
        UploadPolicy::default(),
        KeyGenerator::new("docs"),
        "http://localhost:9000/test-bucket".to_string(),
    )
    .await;

    assert!(!gateway.is_ready());
    assert!(gateway.probe_error().unwrap().contains("connection refused"));

    // Every operation answers ClientNotInitialized without touching the
    // backend (the double would panic if it were reached)
    assert!(matches!(
        gateway.upload(upload_request("report.pdf", b"abc")).await,
        Err(GatewayError::ClientNotInitialized)
    ));
    assert!(matches!(
        gateway.list_recent(None).await,
        Err(GatewayError::ClientNotInitialized)
    ));
    assert!(matches!(
        gateway.get_metadata("docs/report.pdf").await,
        Err(GatewayError::ClientNotInitialized)
    ));
    assert!(matches!(
        gateway.delete("docs/report.pdf").await,
        Err(GatewayError::ClientNotInitialized)
    ));
}

#[tokio::test]
async fn test_upload_stamps_metadata_and_key() {
    let gateway = in_memory_gateway().await;

    let stored = gateway
        .upload(upload_request("report.pdf", b"abc"))
        .await
        .unwrap();

    assert!(stored.key.has_prefix("docs/"));
    assert_eq!(stored.size, 3);
    assert_eq!(stored.original_filename, "report.pdf");
    assert_eq!(
        stored.metadata.get("original_filename").map(String::as_str),
        Some("report.pdf")
    );

    // upload_timestamp is ISO-8601
    let stamp = stored.metadata.get("upload_timestamp").unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());

    // The stored metadata round-trips through the backend
    let (_, metadata) = gateway.get_metadata(stored.key.as_str()).await.unwrap();
    assert_eq!(metadata.content_length, 3);
    assert_eq!(
        metadata
            .custom_metadata
            .get("original_filename")
            .map(String::as_str),
        Some("report.pdf")
    );
}

#[tokio::test]
async fn test_upload_defaults_content_type() {
    let gateway = in_memory_gateway().await;

    let stored = gateway
        .upload(UploadRequest {
            data: b"abc".to_vec(),
            filename: "notes.txt".to_string(),
            content_type: None,
        })
        .await
        .unwrap();

    assert_eq!(stored.content_type, "application/octet-stream");
}

#[tokio::test]
async fn test_list_recent_caps_and_orders() {
    let gateway = in_memory_gateway().await;

    for i in 0..15 {
        gateway
            .upload(upload_request(&format!("file{i}.pdf"), b"abc"))
            .await
            .unwrap();
    }

    let entries = gateway.list_recent(None).await.unwrap();
    assert!(entries.len() <= 10);

    let entries = gateway.list_recent(Some(5)).await.unwrap();
    assert_eq!(entries.len(), 5);

    for pair in entries.windows(2) {
        assert!(pair[0].last_modified >= pair[1].last_modified);
    }
    assert!(entries.iter().all(|e| e.key.has_prefix("docs/")));
}

#[tokio::test]
async fn test_delete_then_get_metadata_is_not_found() {
    let gateway = in_memory_gateway().await;

    let stored = gateway
        .upload(upload_request("report.pdf", b"abc"))
        .await
        .unwrap();

    let deleted = gateway.delete(stored.key.as_str()).await.unwrap();
    assert_eq!(deleted, stored.key);

    match gateway.get_metadata(stored.key.as_str()).await {
        Err(GatewayError::NotFound { key }) => assert_eq!(key, stored.key),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_key_normalization_on_lookup() {
    let gateway = in_memory_gateway().await;

    let stored = gateway
        .upload(upload_request("report.pdf", b"abc"))
        .await
        .unwrap();

    // The bare generated filename resolves to the same object
    let bare = stored.key.file_name();
    let (key, metadata) = gateway.get_metadata(bare).await.unwrap();
    assert_eq!(key, stored.key);
    assert_eq!(metadata.content_length, 3);
}

#[tokio::test]
async fn test_public_url_layout() {
    let gateway = in_memory_gateway().await;

    let stored = gateway
        .upload(upload_request("report.pdf", b"abc"))
        .await
        .unwrap();

    let url = gateway.public_url(&stored.key);
    assert_eq!(
        url,
        format!("http://localhost:9000/test-bucket/{}", stored.key)
    );
}
