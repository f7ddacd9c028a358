//! Error types for the chan-downloader application.

use thiserror::Error;

/// Main error type for the application.
///
/// Only failures that stop the run before the download engine starts end up
/// here. Per-attachment failures are reported as
/// [`DownloadOutcome`](crate::download::DownloadOutcome)s instead.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Thread errors
    #[error("Invalid thread URL: {0}")]
    InvalidThreadUrl(String),

    #[error("Could not find the {0} for the given URL. Please report this to the author.")]
    Scrape(&'static str),

    #[error("Failed to fetch thread: HTTP {0}")]
    ThreadStatus(reqwest::StatusCode),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const THREAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
