//! Product detail fetch: navigate, settle, extract, retry.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use bigc_core::{DetailRecord, SelectorSet, SENTINEL};

use crate::extract::extract_details;
use crate::retry::RetryPolicy;
use crate::session::BrowserSession;

/// Timing knobs for one product page visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailFetchSettings {
    /// Deadline for a single navigation.
    pub page_load_timeout: Duration,
    /// Wait after navigation for client-side rendering before extraction.
    pub settle_delay: Duration,
    /// Attempts per product and the backoff between them.
    pub retry: RetryPolicy,
}

impl DetailFetchSettings {
    #[must_use]
    pub fn from_config(config: &bigc_core::AppConfig) -> Self {
        Self {
            page_load_timeout: Duration::from_secs(config.page_load_timeout_secs),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            retry: RetryPolicy::new(
                config.detail_max_attempts,
                Duration::from_secs(config.detail_retry_backoff_secs),
            ),
        }
    }
}

/// Loads `product_url` in `session` and extracts its detail fields.
///
/// A failed navigation is retried after `settings.retry.backoff`, up to
/// `settings.retry.max_attempts` attempts in total. When every attempt fails
/// the all-missing [`DetailRecord`] is returned; this function never fails
/// and always leaves the session ready for the next product. A cancel that
/// arrives during the backoff ends the retries and also yields the
/// all-missing record.
pub async fn fetch_details<S>(
    session: &mut S,
    product_url: &str,
    selectors: &SelectorSet,
    settings: &DetailFetchSettings,
    cancel: &CancellationToken,
) -> DetailRecord
where
    S: BrowserSession + ?Sized,
{
    let max_attempts = settings.retry.max_attempts;

    for attempt in 1..=max_attempts {
        let started = Instant::now();
        tracing::info!(
            url = product_url,
            attempt,
            max_attempts,
            "fetching product details"
        );

        match session
            .navigate(product_url, settings.page_load_timeout)
            .await
        {
            Ok(()) => {
                if !settings.settle_delay.is_zero() {
                    tokio::time::sleep(settings.settle_delay).await;
                }
                let detail = extract_details(&*session, selectors).await;
                tracing::info!(
                    url = product_url,
                    name = detail.name.as_deref().unwrap_or(SENTINEL),
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "scraped product details"
                );
                return detail;
            }
            Err(e) => {
                tracing::warn!(
                    url = product_url,
                    attempt,
                    max_attempts,
                    error = %e,
                    "failed to load product page"
                );
                if settings.retry.allows_retry_after(attempt) {
                    let cancelled = tokio::select! {
                        biased;
                        () = cancel.cancelled() => true,
                        () = tokio::time::sleep(settings.retry.backoff) => false,
                    };
                    if cancelled {
                        tracing::info!(
                            url = product_url,
                            attempt,
                            "cancelled while waiting to retry product details"
                        );
                        return DetailRecord::default();
                    }
                }
            }
        }
    }

    tracing::warn!(
        url = product_url,
        max_attempts,
        "skipping product details after all attempts failed"
    );
    DetailRecord::default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::session::testing::{FakePage, FakeSession};

    const URL: &str = "https://www.bigc.co.th/en/product/oishi-green-tea";

    fn settings(max_attempts: u32) -> DetailFetchSettings {
        DetailFetchSettings {
            page_load_timeout: Duration::from_secs(30),
            settle_delay: Duration::ZERO,
            retry: RetryPolicy::new(max_attempts, Duration::ZERO),
        }
    }

    async fn fetch(
        session: &mut FakeSession,
        url: &str,
        selectors: &SelectorSet,
        settings: &DetailFetchSettings,
    ) -> DetailRecord {
        fetch_details(session, url, selectors, settings, &CancellationToken::new()).await
    }

    fn page(selectors: &SelectorSet) -> FakePage {
        FakePage::default()
            .with(&selectors.name, &["Oishi Green Tea 500ml"])
            .with(&selectors.brand, &["Oishi"])
    }

    #[tokio::test]
    async fn returns_details_on_first_success() {
        let selectors = SelectorSet::default();
        let mut session = FakeSession::default().with_page(URL, page(&selectors));

        let detail = fetch(&mut session, URL, &selectors, &settings(2)).await;

        assert_eq!(detail.name.as_deref(), Some("Oishi Green Tea 500ml"));
        assert_eq!(session.navigations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn two_failed_navigations_yield_all_missing_record() {
        let selectors = SelectorSet::default();
        let mut session = FakeSession {
            fail_first: 2,
            ..FakeSession::default()
        }
        .with_page(URL, page(&selectors));

        let detail = fetch(&mut session, URL, &selectors, &settings(2)).await;

        assert_eq!(detail, DetailRecord::default());
        assert!(detail.is_unavailable());
        assert_eq!(session.navigations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn recovers_on_retry() {
        let selectors = SelectorSet::default();
        let mut session = FakeSession {
            fail_first: 1,
            ..FakeSession::default()
        }
        .with_page(URL, page(&selectors));

        let detail = fetch(&mut session, URL, &selectors, &settings(2)).await;

        assert_eq!(detail.brand.as_deref(), Some("Oishi"));
        assert_eq!(session.navigations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn session_stays_usable_after_give_up() {
        let selectors = SelectorSet::default();
        let other = "https://www.bigc.co.th/en/product/lays-classic";
        let mut session = FakeSession::default()
            .with_page(other, FakePage::default().with(&selectors.name, &["Lay's"]));

        let missing = fetch(&mut session, URL, &selectors, &settings(2)).await;
        assert!(missing.is_unavailable());

        let found = fetch(&mut session, other, &selectors, &settings(2)).await;
        assert_eq!(found.name.as_deref(), Some("Lay's"));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_backoff_between_attempts_only() {
        let selectors = SelectorSet::default();
        let mut session = FakeSession {
            fail_first: 3,
            ..FakeSession::default()
        };
        let settings = DetailFetchSettings {
            retry: RetryPolicy::new(3, Duration::from_secs(5)),
            ..settings(3)
        };

        let started = tokio::time::Instant::now();
        let detail = fetch(&mut session, URL, &selectors, &settings).await;

        assert!(detail.is_unavailable());
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_skips_remaining_backoff_and_attempts() {
        let selectors = SelectorSet::default();
        let cancel = CancellationToken::new();
        let mut session = FakeSession {
            fail_first: 3,
            cancel_after: Some((1, cancel.clone())),
            ..FakeSession::default()
        };
        let settings = DetailFetchSettings {
            retry: RetryPolicy::new(3, Duration::from_secs(3)),
            ..settings(3)
        };

        let started = tokio::time::Instant::now();
        let detail = fetch_details(&mut session, URL, &selectors, &settings, &cancel).await;

        assert!(detail.is_unavailable());
        assert_eq!(session.navigations.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn from_config_maps_timings() {
        let mut config =
            bigc_core::build_app_config(|_| Err(std::env::VarError::NotPresent)).unwrap();
        config.page_load_timeout_secs = 30;
        config.settle_delay_ms = 2000;
        config.detail_max_attempts = 2;
        config.detail_retry_backoff_secs = 5;

        let settings = DetailFetchSettings::from_config(&config);
        assert_eq!(settings.page_load_timeout, Duration::from_secs(30));
        assert_eq!(settings.settle_delay, Duration::from_secs(2));
        assert_eq!(settings.retry, RetryPolicy::new(2, Duration::from_secs(5)));
    }
}
