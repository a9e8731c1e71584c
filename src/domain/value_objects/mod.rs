mod key_generator;
mod object_key;
mod upload_policy;

pub use key_generator::{sanitize_filename, KeyGenerator};
pub use object_key::ObjectKey;
pub use upload_policy::{UploadPolicy, DEFAULT_MAX_PAYLOAD_BYTES};
