/// Validation errors for upload requests and object keys
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Upload validation errors
    EmptyFilename,
    MissingExtension {
        filename: String,
    },
    ExtensionNotAllowed {
        extension: String,
        allowed: String,
    },
    PayloadTooLarge {
        size: u64,
        max: u64,
    },

    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,
    ObjectKeyDotSegment,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Upload errors
            ValidationError::EmptyFilename => write!(f, "No file selected"),
            ValidationError::MissingExtension { filename } => {
                write!(f, "Filename '{}' has no extension", filename)
            }
            ValidationError::ExtensionNotAllowed { extension, allowed } => {
                write!(
                    f,
                    "File type '{}' is not supported. Supported extensions: {}",
                    extension, allowed
                )
            }
            ValidationError::PayloadTooLarge { size, max } => {
                write!(
                    f,
                    "File size {} bytes exceeds the {} MB limit",
                    size,
                    max / (1024 * 1024)
                )
            }

            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: '{}'", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }
            ValidationError::ObjectKeyDotSegment => {
                write!(f, "Object key cannot contain '.' or '..' path segments")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
