use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;

use crate::{
    adapters::inbound::http::{
        dto::{
            format_timestamp, DeleteResponseDto, ErrorResponseDto, FileEntryDto,
            FileInfoResponseDto, FileListResponseDto, HealthResponseDto, ListFilesParams,
            UploadDataDto, UploadResponseDto,
        },
        router::AppState,
    },
    domain::{errors::GatewayError, models::UploadRequest},
    ports::services::UploadGateway,
};

type Failure = (StatusCode, Json<ErrorResponseDto>);

fn gateway_failure(error: GatewayError) -> Failure {
    (
        StatusCode::from(&error),
        Json(ErrorResponseDto::new(error.to_string())),
    )
}

fn bad_request(message: &str) -> Failure {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseDto::new(message)),
    )
}

/// Landing page with a minimal upload form
pub async fn index() -> Html<&'static str> {
    Html(include_str!("landing.html"))
}

/// Handle a multipart upload of a single `file` field
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponseDto>, Failure> {
    let mut request: Option<UploadRequest> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), Json(ErrorResponseDto::new(e.body_text()))))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| (e.status(), Json(ErrorResponseDto::new(e.body_text()))))?;

        request = Some(UploadRequest {
            data: data.to_vec(),
            filename,
            content_type,
        });
        break;
    }

    let Some(request) = request else {
        return Err(bad_request("No file selected"));
    };
    if request.filename.is_empty() {
        return Err(bad_request("No file selected"));
    }

    // Oversize payloads are rejected here, before the gateway is involved
    let max = state.settings.max_upload_bytes;
    if request.data.len() as u64 > max {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponseDto::new(format!(
                "File size exceeds the {} MB limit",
                max / (1024 * 1024)
            ))),
        ));
    }

    let stored = state
        .gateway
        .upload(request)
        .await
        .map_err(gateway_failure)?;

    let url = state.gateway.public_url(&stored.key);
    Ok(Json(UploadResponseDto {
        success: true,
        message: "File uploaded successfully".to_string(),
        data: UploadDataDto {
            filename: stored.key.file_name().to_string(),
            original_filename: stored.original_filename,
            url,
            size: stored.size,
            upload_time: format_timestamp(stored.uploaded_at),
            upload_key: stored.key.as_str().to_string(),
            folder: state.gateway.upload_folder().to_string(),
        },
    }))
}

/// List the most recently modified uploads, newest first
pub async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<ListFilesParams>,
) -> Result<Json<FileListResponseDto>, Failure> {
    let entries = state
        .gateway
        .list_recent(params.limit)
        .await
        .map_err(gateway_failure)?;

    let files = entries
        .into_iter()
        .map(|entry| FileEntryDto {
            display_name: entry.key.display_name().to_string(),
            url: state.gateway.public_url(&entry.key),
            key: entry.key.as_str().to_string(),
            size: entry.size,
            last_modified: format_timestamp(entry.last_modified),
        })
        .collect();

    Ok(Json(FileListResponseDto {
        success: true,
        files,
        folder: state.gateway.upload_folder().to_string(),
    }))
}

/// Delete one object by key
pub async fn delete_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponseDto>, Failure> {
    let deleted = state.gateway.delete(&key).await.map_err(gateway_failure)?;

    Ok(Json(DeleteResponseDto {
        success: true,
        message: format!("Deleted {}", deleted),
    }))
}

/// Metadata lookup for one object by key
pub async fn file_info(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FileInfoResponseDto>, Failure> {
    let (key, metadata) = state
        .gateway
        .get_metadata(&key)
        .await
        .map_err(gateway_failure)?;

    let url = state.gateway.public_url(&key);
    Ok(Json(FileInfoResponseDto {
        success: true,
        key: key.as_str().to_string(),
        size: metadata.content_length,
        last_modified: format_timestamp(metadata.last_modified),
        content_type: metadata.content_type,
        metadata: metadata.custom_metadata,
        url,
    }))
}

/// Health check; reports degraded store connectivity without failing
pub async fn health(State(state): State<AppState>) -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        s3_configured: state.gateway.is_ready(),
        minio_endpoint: state.settings.endpoint.clone(),
        bucket_name: state.settings.bucket.clone(),
        upload_folder: state.settings.upload_folder.clone(),
    })
}
