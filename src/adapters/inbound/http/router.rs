use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{delete_file, file_info, health, index, list_files, upload_file};
use crate::{app::ServiceSettings, ports::services::UploadGateway};

/// Headroom on top of the upload cap for multipart boundaries and part
/// headers; bodies beyond cap + headroom are refused while reading
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn UploadGateway>,
    pub settings: Arc<ServiceSettings>,
}

/// Create the application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let body_limit = (state.settings.max_upload_bytes + MULTIPART_OVERHEAD_BYTES) as usize;

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload_file))
        .route("/files", get(list_files))
        .route("/delete/{*key}", delete(delete_file))
        .route("/file-info/{*key}", get(file_info))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
