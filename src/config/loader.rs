//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_USER_AGENT;
use crate::fs::default_download_root;

/// Default number of concurrent download workers.
pub const DEFAULT_THREAD_COUNT: usize = 5;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Number of concurrent download workers.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Show a `[n / total]` counter in progress lines.
    #[serde(default)]
    pub counter: bool,

    /// Show the date in progress lines.
    #[serde(default)]
    pub date: bool,

    /// Name the thread folder after its subject instead of its id.
    #[serde(default)]
    pub use_thread_names: bool,

    /// Save attachments under their original filenames.
    #[serde(default)]
    pub original_filename: bool,

    /// Thread subject override.
    #[serde(default)]
    pub subject: Option<String>,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            threads: DEFAULT_THREAD_COUNT,
            counter: false,
            date: false,
            use_thread_names: false,
            original_filename: false,
            subject: None,
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_threads() -> usize {
    DEFAULT_THREAD_COUNT
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective base download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(default_download_root)
    }

    /// Worker count, never below one.
    pub fn thread_count(&self) -> usize {
        self.options.threads.max(1)
    }
}
