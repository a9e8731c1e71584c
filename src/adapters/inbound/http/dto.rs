use std::collections::HashMap;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{GatewayError, ValidationError};

/// Timestamp rendering used throughout the JSON surface
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// DTO for every failed request; `success` is always false
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponseDto {
    pub success: bool,
    pub error: String,
}

impl ErrorResponseDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// DTO for the `data` object of a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadDataDto {
    pub filename: String,
    pub original_filename: String,
    pub url: String,
    pub size: u64,
    pub upload_time: String,
    pub upload_key: String,
    pub folder: String,
}

/// DTO for a successful upload response
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponseDto {
    pub success: bool,
    pub message: String,
    pub data: UploadDataDto,
}

/// DTO for one entry of the file listing
#[derive(Debug, Clone, Serialize)]
pub struct FileEntryDto {
    pub key: String,
    pub display_name: String,
    pub size: u64,
    pub last_modified: String,
    pub url: String,
}

/// DTO for the file listing response
#[derive(Debug, Clone, Serialize)]
pub struct FileListResponseDto {
    pub success: bool,
    pub files: Vec<FileEntryDto>,
    pub folder: String,
}

/// Query parameters accepted by the file listing
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesParams {
    pub limit: Option<usize>,
}

/// DTO for a successful delete response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponseDto {
    pub success: bool,
    pub message: String,
}

/// DTO for the metadata lookup response
#[derive(Debug, Clone, Serialize)]
pub struct FileInfoResponseDto {
    pub success: bool,
    pub key: String,
    pub size: u64,
    pub last_modified: String,
    pub content_type: Option<String>,
    pub metadata: HashMap<String, String>,
    pub url: String,
}

/// DTO for the health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub timestamp: String,
    pub s3_configured: bool,
    pub minio_endpoint: String,
    pub bucket_name: String,
    pub upload_folder: String,
}

impl From<&GatewayError> for StatusCode {
    fn from(error: &GatewayError) -> Self {
        match error {
            GatewayError::ValidationFailed { reason } => match reason {
                ValidationError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            },
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::ClientNotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            GatewayError::MissingCredentials
            | GatewayError::NoSuchBucket { .. }
            | GatewayError::BackendError { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}
