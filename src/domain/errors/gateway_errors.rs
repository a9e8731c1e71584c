use crate::domain::errors::ValidationError;
use crate::domain::value_objects::ObjectKey;

/// Errors surfaced by the object store gateway.
///
/// Every backend failure is mapped into one of these kinds at the adapter
/// boundary; callers never see a raw backend error or a panic.
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// The startup connectivity probe failed and the gateway is permanently
    /// degraded for the lifetime of the process
    ClientNotInitialized,

    /// The upload was rejected before the backend was contacted
    ValidationFailed { reason: ValidationError },

    /// The backend rejected the credentials or none were supplied
    MissingCredentials,

    /// The configured bucket does not exist
    NoSuchBucket { message: String },

    /// The backend denied access to the bucket or object
    AccessDenied { message: String },

    /// Object not found
    NotFound { key: ObjectKey },

    /// Any other backend failure
    BackendError { message: String },
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::ClientNotInitialized => {
                write!(
                    f,
                    "Object store client is not initialized; check endpoint and credential configuration"
                )
            }
            GatewayError::ValidationFailed { reason } => write!(f, "{}", reason),
            GatewayError::MissingCredentials => {
                write!(f, "Object store credentials are missing or invalid")
            }
            GatewayError::NoSuchBucket { message } => {
                write!(f, "Bucket does not exist: {}", message)
            }
            GatewayError::AccessDenied { message } => {
                write!(f, "Access denied by the object store: {}", message)
            }
            GatewayError::NotFound { key } => write!(f, "Object not found: {}", key),
            GatewayError::BackendError { message } => {
                write!(f, "Object store error: {}", message)
            }
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<ValidationError> for GatewayError {
    fn from(reason: ValidationError) -> Self {
        GatewayError::ValidationFailed { reason }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
