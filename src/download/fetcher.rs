//! HTTP fetching with rate-limit backoff.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

/// Wait bounds applied when the server answers `429 Too Many Requests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Shortest wait between attempts.
    pub min_wait: Duration,
    /// Longest wait between attempts.
    pub max_wait: Duration,
    /// Wait used when `Retry-After` is missing or unparseable.
    pub default_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_wait: Duration::from_secs(5),
            max_wait: Duration::from_secs(30),
            default_wait: Duration::from_secs(30),
        }
    }
}

/// Terminal fetch failure. Rate limiting is never terminal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Compute how long to wait after a 429 response.
///
/// `header` is the raw `Retry-After` value. Integers are seconds, anything
/// else is tried as an HTTP-date relative to `now`. Parsed values are
/// clamped to the policy bounds; a missing or unparseable header yields the
/// policy default.
pub fn retry_delay(header: Option<&str>, now: DateTime<Utc>, policy: &RetryPolicy) -> Duration {
    let header = header.map(str::trim).filter(|value| !value.is_empty());

    let Some(value) = header else {
        tracing::warn!(
            "No Retry-After header on HTTP 429, using default retry timeout of {}s",
            policy.default_wait.as_secs()
        );
        return policy.default_wait;
    };

    let Some(millis) = parse_retry_after_millis(value, now) else {
        tracing::warn!(
            "Could not parse HTTP Too Many Requests retry after '{}'. Using default retry timeout.",
            value
        );
        return policy.default_wait;
    };

    let min = policy.min_wait.as_millis() as i64;
    let max = policy.max_wait.as_millis() as i64;
    Duration::from_millis(millis.clamp(min, max.max(min)) as u64)
}

/// Signed wait in milliseconds; negative for dates in the past.
fn parse_retry_after_millis(value: &str, now: DateTime<Utc>) -> Option<i64> {
    if let Ok(seconds) = value.parse::<i64>() {
        return Some(seconds.saturating_mul(1000));
    }

    // IMF-fixdate, RFC 850 and asctime forms.
    let date: DateTime<Utc> = httpdate::parse_http_date(value).ok()?.into();
    Some((date - now).num_milliseconds())
}

/// Issues GET requests, retrying for as long as the server rate limits.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// GET `url` until it succeeds or fails with something other than 429.
    ///
    /// `on_rate_limited` is called with the chosen wait before every sleep.
    /// Only the calling task sleeps.
    pub async fn fetch<F>(&self, url: &str, mut on_rate_limited: F) -> Result<Response, FetchError>
    where
        F: FnMut(Duration),
    {
        loop {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status != StatusCode::TOO_MANY_REQUESTS {
                return Err(FetchError::Status(status));
            }

            let header = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok());
            let delay = retry_delay(header, Utc::now(), &self.policy);
            drop(response);

            on_rate_limited(delay);
            tokio::time::sleep(delay).await;
        }
    }
}
