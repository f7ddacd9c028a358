//! Configuration module for the chan-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument merging (see [`crate::cli::Args`])
//! - Configuration and thread URL validation

pub mod loader;
pub mod validation;

pub use loader::{Config, HttpConfig, OptionsConfig, DEFAULT_THREAD_COUNT};
pub use validation::{parse_thread_url, thread_path, validate_config};
