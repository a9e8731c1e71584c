use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::ObjectKey;

/// An incoming upload: the full payload plus what the client declared about
/// it. Lives only for the duration of one upload call.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Descriptor of an object created by a successful upload.
///
/// Never mutated after creation; destroyed only by an explicit delete.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: ObjectKey,
    pub original_filename: String,
    pub size: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub metadata: HashMap<String, String>,
}

/// Metadata for an object as reported by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
    pub content_length: u64,
    pub e_tag: Option<String>,
    pub last_modified: DateTime<Utc>,
    pub custom_metadata: HashMap<String, String>,
}
