//! Imageboard HTTP client.

use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = "4chan-Downloader";

/// Thin wrapper around the process-wide HTTP client.
///
/// The same [`Client`] is used to fetch the thread page and, through
/// [`ChanClient::http`], by every download worker.
#[derive(Debug, Clone)]
pub struct ChanClient {
    client: Client,
}

impl ChanClient {
    /// Create a new client sending `user_agent` with every request.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// The underlying HTTP client, shared with the download workers.
    pub fn http(&self) -> Client {
        self.client.clone()
    }

    /// Fetch the HTML of a thread page.
    pub async fn fetch_thread_html(&self, url: &Url) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::ThreadStatus(status));
        }

        Ok(response.text().await?)
    }
}
