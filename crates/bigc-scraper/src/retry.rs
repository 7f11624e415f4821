//! Bounded fixed-backoff retry for transient scraper failures.
//!
//! Only listing transport timeouts are retried here. Every other error is
//! returned immediately and the caller decides what it means.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// How many times to try an operation and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Always at least 1.
    pub max_attempts: u32,
    /// Fixed sleep before each retry.
    pub backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Policy allowing `retries` additional attempts after the first.
    #[must_use]
    pub fn with_retries(retries: u32, backoff: Duration) -> Self {
        Self::new(retries.saturating_add(1), backoff)
    }

    /// `true` if another attempt is allowed after `attempt` (1-based) failed.
    #[must_use]
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Returns `true` if `err` is a transient condition worth another attempt.
///
/// Retriable:
/// - [`ScraperError::Timeout`] — the request or body read timed out.
///
/// Everything else (non-2xx status, connection refused, malformed body) is
/// returned to the caller on the first occurrence.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    matches!(err, ScraperError::Timeout { .. })
}

/// Executes `operation`, retrying timeouts with a fixed backoff until
/// `policy.max_attempts` is reached. The last error is returned when the
/// budget is spent.
///
/// With `max_attempts = 3` and `backoff = 5s` the worst case is three
/// requests and ten seconds of sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || !policy.allows_retry_after(attempt) {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    backoff_ms = u64::try_from(policy.backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "listing request timed out, retrying after backoff"
                );
            }
        }

        tokio::time::sleep(policy.backoff).await;
        attempt += 1;
    }
}
