//! Configuration and input validation logic.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

static THREAD_PATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(\w+)/thread/(\d+)").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.http.user_agent)?;

    if let Some(dir) = &config.options.download_directory {
        if dir.is_file() {
            return Err(Error::ConfigValidation {
                field: "download_directory".to_string(),
                message: format!("'{}' is a file, not a directory", dir.display()),
            });
        }
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: "User agent cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Parse a thread URL given on the command line.
///
/// Only absolute http(s) URLs with a host are accepted.
pub fn parse_thread_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidThreadUrl(format!(
            "unsupported scheme '{}' in {}",
            url.scheme(),
            input
        )));
    }

    if url.host_str().is_none() {
        return Err(Error::InvalidThreadUrl(format!("missing host in {}", input)));
    }

    Ok(url)
}

/// Board and thread id from a `/board/thread/id` URL path, if present.
pub fn thread_path(url: &Url) -> Option<(String, String)> {
    let caps = THREAD_PATH_PATTERN.captures(url.path())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}
