pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core entities and value objects
pub use domain::{
    GatewayError,
    GatewayResult,
    // Value objects
    KeyGenerator,
    ObjectKey,
    // Models
    ObjectMetadata,
    StoredObject,
    UploadPolicy,
    UploadRequest,
    // Errors
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{
    ObjectInfo,
    // Storage port
    ObjectStore,
    // Service port
    UploadGateway,
};

// Service implementation - the gateway itself
pub use services::{GatewayServiceImpl, DEFAULT_LIST_LIMIT};

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, AppBuilder, AppConfig, AppError, AppServices,
    ServiceSettings, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::ApacheObjectStoreAdapter;

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, ApacheObjectStoreAdapter, AppBuilder, AppServices,
        GatewayServiceImpl, KeyGenerator, ObjectKey, ObjectStore, UploadGateway, UploadPolicy,
        UploadRequest,
    };
}
