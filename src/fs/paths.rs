//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::error::Result;
use crate::fs::naming::sanitize_path_component;
use crate::media::Thread;

/// Folder created under the user's downloads directory by default.
pub const DOWNLOAD_FOLDER_NAME: &str = "4Chan-Downloader";

/// Default base directory: `<Downloads>/4Chan-Downloader`.
///
/// Falls back to the current directory when the platform has no downloads
/// folder.
pub fn default_download_root() -> PathBuf {
    let base = UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    base.join(DOWNLOAD_FOLDER_NAME)
}

/// Destination folder for a thread: `base/board/<subject or id>`.
pub fn get_thread_folder(base: &Path, thread: &Thread, use_thread_names: bool) -> Result<PathBuf> {
    let board = sanitize_path_component(&thread.board)?;
    let leaf = if use_thread_names {
        sanitize_path_component(&thread.subject)?
    } else {
        sanitize_path_component(&thread.id)?
    };

    Ok(base.join(board).join(leaf))
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
