pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use services::UploadGateway;
pub use storage::{ObjectInfo, ObjectStore};
