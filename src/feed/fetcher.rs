use futures::stream::{self, StreamExt};
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while retrieving a feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Server returned 429 Too Many Requests after max retries
    #[error("Rate limited after {0} retries")]
    RateLimited(u32),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
}

/// Knobs for a batch of fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt.
    pub backoff_base: Duration,
    pub concurrency: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            concurrency: 4,
        }
    }
}

impl From<&Config> for FetchOptions {
    fn from(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.request_timeout_secs),
            max_retries: config.max_retries,
            concurrency: config.concurrency.max(1),
            ..Self::default()
        }
    }
}

/// The body retrieved for one subscription.
///
/// `body` is empty when the fetch failed; the failure has already been logged.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub url: String,
    pub body: String,
}

/// Builds the HTTP client shared by every fetch in a run.
pub fn build_client(user_agent: &str) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .redirect(redirect_policy())
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

/// Follows at most 3 redirects and refuses redirect loops.
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    })
}

/// Fetches every subscription with bounded concurrency.
///
/// Documents come back in the same order as `urls`. A feed that cannot be
/// fetched is logged and contributes an empty body, so one broken
/// subscription never stops the others from being shown.
pub async fn fetch_all(
    client: &reqwest::Client,
    urls: &[String],
    options: &FetchOptions,
) -> Vec<FeedDocument> {
    stream::iter(urls)
        .map(|url| async move {
            let body = match fetch_document(client, url, options).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(feed = %url, error = %e, "Failed to fetch feed, skipping");
                    String::new()
                }
            };
            FeedDocument {
                url: url.clone(),
                body,
            }
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await
}

/// Retrieves a single feed document as text.
///
/// # Behavior
///
/// - Each attempt, headers and body together, is bounded by `options.timeout`
/// - HTTP 429 and 5xx responses are retried with exponential backoff
/// - Truncated bodies (shorter than Content-Length) are retried the same way
/// - Other non-2xx responses fail immediately with [`FetchError::HttpStatus`]
/// - Bodies over 10MB fail with [`FetchError::ResponseTooLarge`]
/// - Invalid UTF-8 is replaced rather than rejected
pub async fn fetch_document(
    client: &reqwest::Client,
    url: &str,
    options: &FetchOptions,
) -> Result<String, FetchError> {
    let mut retry_count = 0;

    let bytes = loop {
        let deadline = tokio::time::Instant::now() + options.timeout;
        let response = tokio::time::timeout_at(deadline, client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            if retry_count >= options.max_retries {
                return Err(FetchError::RateLimited(options.max_retries));
            }
            let delay = backoff_delay(options.backoff_base, retry_count);
            tracing::warn!(
                feed = %url,
                retry = retry_count,
                delay_ms = delay.as_millis() as u64,
                "Rate limited, backing off"
            );
            tokio::time::sleep(delay).await;
            retry_count += 1;
            continue;
        }

        if status.is_server_error() {
            if retry_count >= options.max_retries {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }
            let delay = backoff_delay(options.backoff_base, retry_count);
            tracing::warn!(
                feed = %url,
                status = %status,
                retry = retry_count,
                delay_ms = delay.as_millis() as u64,
                "Server error, retrying after delay"
            );
            tokio::time::sleep(delay).await;
            retry_count += 1;
            continue;
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = tokio::time::timeout_at(deadline, read_limited_bytes(response, MAX_FEED_SIZE))
            .await
            .map_err(|_| FetchError::Timeout)?;
        match body {
            Ok(bytes) => break bytes,
            Err(FetchError::IncompleteResponse { expected, received }) => {
                if retry_count >= options.max_retries {
                    return Err(FetchError::IncompleteResponse { expected, received });
                }
                let delay = backoff_delay(options.backoff_base, retry_count);
                tracing::debug!(
                    feed = %url,
                    expected = expected,
                    received = received,
                    attempt = retry_count + 1,
                    "Retrying incomplete download"
                );
                tokio::time::sleep(delay).await;
                retry_count += 1;
                continue;
            }
            Err(e) => return Err(e),
        }
    };

    tracing::debug!(feed = %url, bytes = bytes.len(), "Fetched feed");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn backoff_delay(base: Duration, retry: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(retry))
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}
