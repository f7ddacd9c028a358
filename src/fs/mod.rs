//! Filesystem module.
//!
//! Provides:
//! - Thread folder resolution and creation
//! - Filename sanitization and output naming

pub mod naming;
pub mod paths;

pub use naming::{clean_file_name, output_filename, sanitize_path_component};
pub use paths::{default_download_root, ensure_dir, get_thread_folder, DOWNLOAD_FOLDER_NAME};
