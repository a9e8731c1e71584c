mod upload_handlers;

pub use upload_handlers::{delete_file, file_info, health, index, list_files, upload_file};
