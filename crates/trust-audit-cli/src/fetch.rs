//! Page fetcher wrapping reqwest.
//!
//! One GET per page: no retries, no backoff. The body is read in full so
//! the recorded elapsed time covers the whole download.

use std::time::{Duration, Instant};

/// Redirect hops followed before a fetch fails.
pub const MAX_REDIRECTS: usize = 30;

/// A page that answered with some status code.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client for audited pages.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("trust-audit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// GET `url` once. Errors carry no partial data.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status().as_u16();

        let body = resp.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        let elapsed = start.elapsed();

        tracing::debug!(url, status, elapsed_ms = elapsed.as_millis() as u64, "fetched page");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
            elapsed,
        })
    }
}

/// Milliseconds rounded to two decimals.
pub fn elapsed_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
