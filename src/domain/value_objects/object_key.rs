use crate::domain::errors::ValidationError;

/// A validated object key (path) in the storage backend
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > 1024 {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        // Check for invalid characters (null bytes)
        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        // Dot-only segments would let a client-supplied key escape the folder
        if value
            .split('/')
            .any(|segment| !segment.is_empty() && segment.bytes().all(|b| b == b'.'))
        {
            return Err(ValidationError::ObjectKeyDotSegment);
        }

        Ok(Self(value))
    }

    /// Normalize a raw client-supplied key into the fixed upload folder,
    /// prepending the folder when it is missing
    pub fn with_folder(raw: &str, folder: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim_start_matches('/');

        if trimmed == folder || trimmed.starts_with(&format!("{}/", folder)) {
            Self::new(trimmed.to_string())
        } else {
            Self::new(format!("{}/{}", folder, trimmed))
        }
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the file name part of the key (everything after the last '/')
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Check if this key has the given prefix
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Recover the sanitized original filename from a generated key.
    ///
    /// Generated file names look like `20240131_235959_a1b2c3d4_report.pdf`;
    /// keys that do not match that shape are returned whole.
    pub fn display_name(&self) -> &str {
        let name = self.file_name();
        let mut parts = name.splitn(4, '_');

        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(date), Some(time), Some(random), Some(rest))
                if date.len() == 8
                    && date.bytes().all(|b| b.is_ascii_digit())
                    && time.len() == 6
                    && time.bytes().all(|b| b.is_ascii_digit())
                    && random.len() == 8
                    && random.bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                rest
            }
            _ => name,
        }
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
