use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};
use upload_gateway::{
    adapters::inbound::http::router::{create_router, AppState},
    app::{AppBuilder, AppConfig, StorageBackend, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_FOLDER},
};

#[derive(Parser, Debug)]
#[command(name = "upload-gateway")]
#[command(about = "HTTP upload gateway for an S3-compatible object store", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (memory, s3, minio)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// S3 endpoint URL (for the MinIO backend)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET")]
    s3_bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Use SSL for the MinIO connection
    #[arg(long, env = "MINIO_USE_SSL", default_value = "false")]
    minio_use_ssl: bool,

    /// Folder segment all uploads live under
    #[arg(long, env = "UPLOAD_FOLDER", default_value = DEFAULT_UPLOAD_FOLDER)]
    upload_folder: String,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => {
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET is required for the s3 backend")?;

                StorageBackend::S3 {
                    bucket,
                    region: self.s3_region.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                }
            }
            "minio" => {
                let endpoint = self
                    .s3_endpoint
                    .clone()
                    .context("S3_ENDPOINT is required for the minio backend")?;
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET is required for the minio backend")?;
                let access_key = self
                    .s3_access_key
                    .clone()
                    .context("S3_ACCESS_KEY is required for the minio backend")?;
                let secret_key = self
                    .s3_secret_key
                    .clone()
                    .context("S3_SECRET_KEY is required for the minio backend")?;

                StorageBackend::MinIO {
                    endpoint,
                    bucket,
                    access_key,
                    secret_key,
                    use_ssl: self.minio_use_ssl,
                }
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        Ok(AppConfig {
            storage_backend,
            upload_folder: self.upload_folder.clone(),
            max_upload_bytes: self.max_upload_bytes,
        })
    }

    fn init_logging(&self) {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        };

        tracing_subscriber::fmt().with_max_level(level).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    info!("Starting upload gateway");
    info!("Storage backend: {}", cli.storage_backend);

    let config = cli.to_app_config()?;
    let services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    if let Some(error) = services.gateway.probe_error() {
        warn!(%error, "serving in degraded mode: object store unreachable");
    }

    let state = AppState {
        gateway: Arc::new(services.gateway),
        settings: Arc::new(services.settings),
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "upload-gateway",
            "--port",
            "8080",
            "--storage-backend",
            "minio",
            "--s3-endpoint",
            "http://localhost:9000",
            "--s3-bucket",
            "test-bucket",
            "--s3-access-key",
            "test-key",
            "--s3-secret-key",
            "test-secret",
        ]);

        assert_eq!(cli.port, 8080);
        assert_eq!(cli.storage_backend, "minio");
        assert_eq!(cli.s3_bucket, Some("test-bucket".to_string()));

        let config = cli.to_app_config().unwrap();
        match config.storage_backend {
            StorageBackend::MinIO { endpoint, .. } => {
                assert_eq!(endpoint, "http://localhost:9000");
            }
            _ => panic!("Expected MinIO backend"),
        }
    }

    #[test]
    fn test_memory_config_is_default() {
        let cli = Cli::parse_from(["upload-gateway"]);

        let config = cli.to_app_config().unwrap();
        match config.storage_backend {
            StorageBackend::InMemory => (),
            _ => panic!("Expected InMemory backend"),
        }
        assert_eq!(config.upload_folder, "docs");
    }

    #[test]
    fn test_minio_requires_endpoint() {
        let cli = Cli::parse_from(["upload-gateway", "--storage-backend", "minio"]);
        assert!(cli.to_app_config().is_err());
    }
}
