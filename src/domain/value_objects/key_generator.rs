use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::ObjectKey;

/// Placeholder used when sanitization leaves nothing of the original name
const FALLBACK_FILE_NAME: &str = "file";

/// Generates collision-resistant object keys of the form
/// `<folder>/<YYYYMMDD_HHMMSS>_<8 hex chars>_<sanitized filename>`.
///
/// The timestamp has second resolution, so two uploads of the same file
/// within the same second rely entirely on the 32-bit random suffix to stay
/// apart. That is an accepted collision probability, not a guarantee.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    folder: String,
}

impl KeyGenerator {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// The fixed folder segment all generated keys live under
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Produce a fresh key for an uploaded file
    pub fn generate(&self, original_filename: &str) -> Result<ObjectKey, ValidationError> {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let random = Uuid::new_v4().simple().to_string();

        ObjectKey::new(format!(
            "{}/{}_{}_{}",
            self.folder,
            stamp,
            &random[..8],
            sanitize_filename(original_filename)
        ))
    }
}

/// Reduce a client-declared filename to something safe as a path segment:
/// ASCII alphanumerics plus `.`, `-` and `_` survive, everything else
/// (path separators, control characters, ...) becomes `_`, and leading dots
/// are stripped so the name cannot hide or traverse.
pub fn sanitize_filename(original: &str) -> String {
    let mut cleaned = String::with_capacity(original.len());
    for c in original.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            cleaned.push(c);
        } else {
            cleaned.push('_');
        }
    }

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_key_shape() {
        let keygen = KeyGenerator::new("docs");
        let key = keygen.generate("report.pdf").unwrap();

        let name = key
            .as_str()
            .strip_prefix("docs/")
            .expect("key must live under the folder");

        let mut parts = name.splitn(4, '_');
        let date = parts.next().unwrap();
        let time = parts.next().unwrap();
        let random = parts.next().unwrap();
        let rest = parts.next().unwrap();

        assert_eq!(date.len(), 8);
        assert!(date.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(time.len(), 6);
        assert!(time.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(random.len(), 8);
        assert!(random.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(rest, "report.pdf");
    }

    #[test]
    fn test_generated_keys_unique_over_many_trials() {
        let keygen = KeyGenerator::new("docs");
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            let key = keygen.generate("report.pdf").unwrap();
            assert!(seen.insert(key.as_str().to_string()), "duplicate key");
        }
    }

    #[test]
    fn test_sanitize_replaces_separators_and_controls() {
        assert_eq!(sanitize_filename("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_filename("tab\there.txt"), "tab_here.txt");
        assert_eq!(sanitize_filename("spaced name.pdf"), "spaced_name.pdf");
    }

    #[test]
    fn test_sanitize_strips_leading_dots() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_filename(".hidden.txt"), "hidden.txt");
        assert_eq!(sanitize_filename("..."), "file");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_display_name_roundtrip() {
        let keygen = KeyGenerator::new("docs");
        let key = keygen.generate("quarterly report.pdf").unwrap();
        assert_eq!(key.display_name(), "quarterly_report.pdf");
    }
}
