//! Per-category pagination over the listing API.

use std::ops::ControlFlow;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use bigc_core::{AppConfig, CategoryConfig, ProductRecord, SelectorSet};

use crate::client::ListingClient;
use crate::detail::{fetch_details, DetailFetchSettings};
use crate::merge::{merge_product, SummaryFields};
use crate::session::BrowserSession;
use crate::types::SummaryItem;

/// Everything [`collect_category`] needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// Storefront origin used to build product URLs.
    pub site_url: String,
    /// Pause after each non-empty listing page.
    pub inter_request_delay: Duration,
    /// Hard upper bound on listing pages per category.
    pub max_pages: u32,
    pub detail: DetailFetchSettings,
    pub selectors: SelectorSet,
}

impl CatalogSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig, selectors: SelectorSet) -> Self {
        Self {
            site_url: config.site_url.clone(),
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
            max_pages: config.max_pages,
            detail: DetailFetchSettings::from_config(config),
            selectors,
        }
    }
}

/// Why pagination of a category stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationEnd {
    /// A page came back with no products.
    Exhausted,
    /// A listing request failed; earlier records are kept.
    ListingFailed { page: u32, reason: String },
    /// `max_pages` pages were processed without reaching an empty page.
    PageLimit,
    /// The run was cancelled mid-category.
    Cancelled,
}

/// Records collected for one category and how its pagination ended.
#[derive(Debug)]
pub struct CategoryOutcome {
    pub records: Vec<ProductRecord>,
    /// Number of non-empty listing pages processed.
    pub pages: u32,
    pub end: PaginationEnd,
}

/// Walks the listing pages of `category` from page 1 and enriches every
/// product on each page through `session`.
///
/// Pagination stops at the first empty page, the first failed listing
/// request, the page limit, or cancellation. Cancellation is also observed
/// while a listing request or its timeout retries are in flight. None of these is an error for
/// the caller: whatever was collected up to that point is returned.
pub async fn collect_category<S>(
    client: &ListingClient,
    session: &mut S,
    category: &CategoryConfig,
    settings: &CatalogSettings,
    cancel: &CancellationToken,
) -> CategoryOutcome
where
    S: BrowserSession + ?Sized,
{
    let mut records = Vec::new();
    let mut pages: u32 = 0;
    let mut page: u32 = 1;

    let end = loop {
        if cancel.is_cancelled() {
            break PaginationEnd::Cancelled;
        }
        if page > settings.max_pages {
            tracing::warn!(
                category = %category.slug,
                max_pages = settings.max_pages,
                "page limit reached; stopping category"
            );
            break PaginationEnd::PageLimit;
        }

        tracing::info!(category = %category.slug, page, "fetching listing page");
        let fetched = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = client.fetch_listing_page(&category.slug, page) => Some(result),
        };
        let Some(fetched) = fetched else {
            tracing::info!(category = %category.slug, page, "cancelled during listing request");
            break PaginationEnd::Cancelled;
        };
        let listing = match fetched {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(
                    category = %category.slug,
                    page,
                    error = %e,
                    "listing request failed; stopping category"
                );
                break PaginationEnd::ListingFailed {
                    page,
                    reason: e.to_string(),
                };
            }
        };

        let total = listing.response.total();
        let items = listing.response.into_products();
        tracing::info!(
            category = %category.slug,
            page,
            items = items.len(),
            total,
            elapsed_ms = u64::try_from(listing.elapsed.as_millis()).unwrap_or(u64::MAX),
            "listing page fetched"
        );

        if items.is_empty() {
            tracing::info!(category = %category.slug, page, "no more products in category");
            break PaginationEnd::Exhausted;
        }

        pages += 1;
        if enrich_page(session, category, &items, settings, cancel, &mut records)
            .await
            .is_break()
        {
            break PaginationEnd::Cancelled;
        }

        if !settings.inter_request_delay.is_zero() {
            let cancelled = tokio::select! {
                biased;
                () = cancel.cancelled() => true,
                () = tokio::time::sleep(settings.inter_request_delay) => false,
            };
            if cancelled {
                break PaginationEnd::Cancelled;
            }
        }
        page += 1;
    };

    tracing::info!(
        category = %category.slug,
        records = records.len(),
        pages,
        end = ?end,
        "category finished"
    );

    CategoryOutcome {
        records,
        pages,
        end,
    }
}

/// Fetches details for each listing item in order and appends the merged
/// records. Breaks as soon as cancellation is observed between items.
async fn enrich_page<S>(
    session: &mut S,
    category: &CategoryConfig,
    items: &[SummaryItem],
    settings: &CatalogSettings,
    cancel: &CancellationToken,
    records: &mut Vec<ProductRecord>,
) -> ControlFlow<()>
where
    S: BrowserSession + ?Sized,
{
    for item in items {
        if cancel.is_cancelled() {
            return ControlFlow::Break(());
        }

        let summary = SummaryFields::from_item(item, &settings.site_url);
        let detail = fetch_details(
            session,
            &summary.product_url,
            &settings.selectors,
            &settings.detail,
            cancel,
        )
        .await;
        records.push(merge_product(summary, detail, &category.slug, Utc::now()));
    }
    ControlFlow::Continue(())
}
