use std::collections::BTreeSet;

use crate::domain::errors::ValidationError;

/// Default upload cap: 16 MiB
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Extensions accepted out of the box: the known document, image, archive and
/// media types this service was built to hold.
const DEFAULT_ALLOWED_EXTENSIONS: [&str; 19] = [
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "csv", "json", "xml", "doc", "docx", "xls", "xlsx",
    "ppt", "pptx", "zip", "rar", "mp4", "mp3",
];

/// Upload validation policy: a fixed extension allow-list plus a maximum
/// payload size.
///
/// Validation is by filename suffix only, with no content sniffing; a crafted
/// filename bypasses true type checking. That limitation is deliberate.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_extensions: BTreeSet<String>,
    max_payload_bytes: u64,
}

impl UploadPolicy {
    /// Create a policy with a custom allow-list; the set is fixed for the
    /// lifetime of the policy
    pub fn new(
        extensions: impl IntoIterator<Item = impl Into<String>>,
        max_payload_bytes: u64,
    ) -> Self {
        Self {
            allowed_extensions: extensions
                .into_iter()
                .map(|ext| ext.into().to_lowercase())
                .collect(),
            max_payload_bytes,
        }
    }

    pub fn with_max_payload_bytes(mut self, max_payload_bytes: u64) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    pub fn max_payload_bytes(&self) -> u64 {
        self.max_payload_bytes
    }

    /// Check a declared filename and payload length against the policy
    pub fn check(&self, filename: &str, payload_len: u64) -> Result<(), ValidationError> {
        let trimmed = filename.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyFilename);
        }

        let extension = match trimmed.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_lowercase(),
            _ => {
                return Err(ValidationError::MissingExtension {
                    filename: trimmed.to_string(),
                });
            }
        };

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::ExtensionNotAllowed {
                extension,
                allowed: self.allowed_list(),
            });
        }

        if payload_len > self.max_payload_bytes {
            return Err(ValidationError::PayloadTooLarge {
                size: payload_len,
                max: self.max_payload_bytes,
            });
        }

        Ok(())
    }

    /// The allow-list as a comma-separated string, for error messages
    pub fn allowed_list(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_PAYLOAD_BYTES)
    }
}
