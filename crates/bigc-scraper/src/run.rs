//! Whole-run orchestration: one browser session, every category in order.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use bigc_core::{AppConfig, CatalogSnapshot, CategoryConfig, SelectorSet};

use crate::catalog::{collect_category, CatalogSettings, PaginationEnd};
use crate::client::ListingClient;
use crate::error::ScraperError;
use crate::session::{BrowserSession, SessionLauncher};

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub catalog: CatalogSettings,
    /// Pause between two categories. Not applied after the last one.
    pub inter_category_delay: Duration,
}

impl RunSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig, selectors: SelectorSet) -> Self {
        Self {
            catalog: CatalogSettings::from_config(config, selectors),
            inter_category_delay: Duration::from_millis(config.inter_category_delay_ms),
        }
    }
}

/// Launches one browser session, collects every category in the given order,
/// and returns the concatenated records.
///
/// Listing failures end only the affected category. Cancellation ends the run
/// early with whatever was collected and `cancelled` set on the snapshot. The
/// session is closed on every path after a successful launch.
///
/// # Errors
///
/// Returns the launcher's error if the browser session cannot be started.
pub async fn run_catalog<L>(
    launcher: &L,
    client: &ListingClient,
    categories: &[CategoryConfig],
    settings: &RunSettings,
    cancel: &CancellationToken,
) -> Result<CatalogSnapshot, ScraperError>
where
    L: SessionLauncher + ?Sized,
{
    let started = Instant::now();
    tracing::info!(categories = categories.len(), "starting catalog run");

    let mut session = launcher.launch().await?;
    let snapshot = collect_all(&mut session, client, categories, settings, cancel).await;

    if let Err(e) = session.close().await {
        tracing::error!(error = %e, "failed to close browser session");
    }

    tracing::info!(
        records = snapshot.len(),
        cancelled = snapshot.cancelled,
        elapsed_secs = started.elapsed().as_secs(),
        "catalog run finished"
    );
    Ok(snapshot)
}

async fn collect_all<S>(
    session: &mut S,
    client: &ListingClient,
    categories: &[CategoryConfig],
    settings: &RunSettings,
    cancel: &CancellationToken,
) -> CatalogSnapshot
where
    S: BrowserSession + ?Sized,
{
    let mut snapshot = CatalogSnapshot::default();

    for (index, category) in categories.iter().enumerate() {
        if cancel.is_cancelled() {
            snapshot.cancelled = true;
            break;
        }

        tracing::info!(
            category = %category.name,
            slug = %category.slug,
            position = index + 1,
            of = categories.len(),
            "scraping category"
        );
        let outcome = collect_category(client, session, category, &settings.catalog, cancel).await;
        snapshot.records.extend(outcome.records);

        if outcome.end == PaginationEnd::Cancelled || cancel.is_cancelled() {
            snapshot.cancelled = true;
            break;
        }

        let is_last = index + 1 == categories.len();
        if !is_last && !settings.inter_category_delay.is_zero() {
            let cancelled = tokio::select! {
                biased;
                () = cancel.cancelled() => true,
                () = tokio::time::sleep(settings.inter_category_delay) => false,
            };
            if cancelled {
                snapshot.cancelled = true;
                break;
            }
        }
    }

    if snapshot.cancelled {
        tracing::warn!(records = snapshot.len(), "catalog run cancelled");
    }
    snapshot
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
