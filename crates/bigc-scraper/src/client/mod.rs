//! HTTP client for the storefront's category listing data route.

mod url;

use std::time::{Duration, Instant};

use reqwest::Client;

use crate::error::ScraperError;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::types::ListingResponse;

pub use url::{listing_url, product_url};

/// One decoded listing page plus how long the request took.
#[derive(Debug)]
pub struct ListingPage {
    pub response: ListingResponse,
    pub elapsed: Duration,
}

/// HTTP client for `GET {base}/{slug}.json?page=N`.
///
/// Non-2xx responses become [`ScraperError::UnexpectedStatus`]. Transport
/// timeouts become [`ScraperError::Timeout`] and are retried with a fixed
/// backoff up to `timeout_policy.max_attempts`; no other error is retried.
#[derive(Debug)]
pub struct ListingClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    timeout_policy: RetryPolicy,
}

impl ListingClient {
    /// Creates a `ListingClient` with the given request timeout, `User-Agent`,
    /// and timeout retry policy. The timeout bounds both connecting and the
    /// whole request.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        timeout_policy: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let request_timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(request_timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            request_timeout,
            timeout_policy,
        })
    }

    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &bigc_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.listing_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            RetryPolicy::with_retries(
                config.listing_timeout_retries,
                Duration::from_secs(config.listing_timeout_backoff_secs),
            ),
        )
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub fn timeout_policy(&self) -> RetryPolicy {
        self.timeout_policy
    }

    /// Fetches and decodes one listing page for `slug`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Timeout`] — every attempt timed out.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status (not retried).
    /// - [`ScraperError::Http`] — connection or TLS failure (not retried).
    /// - [`ScraperError::Deserialize`] — body is not the expected JSON (not retried).
    /// - [`ScraperError::InvalidUrl`] — the configured base URL is not a URL.
    pub async fn fetch_listing_page(
        &self,
        slug: &str,
        page: u32,
    ) -> Result<ListingPage, ScraperError> {
        let url = listing_url(&self.base_url, slug, page)?;

        retry_with_backoff(self.timeout_policy, || {
            let url = url.clone();
            async move {
                let started = Instant::now();
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await
                    .map_err(|e| classify_transport_error(e, &url))?;
                let status = response.status();

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response
                    .text()
                    .await
                    .map_err(|e| classify_transport_error(e, &url))?;
                let parsed = serde_json::from_str::<ListingResponse>(&body).map_err(|e| {
                    ScraperError::Deserialize {
                        context: format!("listing page {url}"),
                        source: e,
                    }
                })?;

                Ok(ListingPage {
                    response: parsed,
                    elapsed: started.elapsed(),
                })
            }
        })
        .await
    }
}

/// Splits transport timeouts out of the generic HTTP error so the retry
/// layer can tell them apart.
fn classify_transport_error(err: reqwest::Error, url: &str) -> ScraperError {
    if err.is_timeout() {
        ScraperError::Timeout {
            url: url.to_owned(),
        }
    } else {
        ScraperError::Http(err)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
