use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Listing API root; category requests go to `{base}/{slug}.json?page=N`.
    pub listing_base_url: String,
    /// Storefront root used to build `{site}/en/product/{slug}` URLs.
    pub site_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub inter_request_delay_ms: u64,
    pub inter_category_delay_ms: u64,
    /// Additional listing attempts allowed after a transport timeout.
    pub listing_timeout_retries: u32,
    pub listing_timeout_backoff_secs: u64,
    /// Safety bound on listing pages walked per category.
    pub max_pages: u32,
    /// Total navigation attempts per product page (not retries).
    pub detail_max_attempts: u32,
    pub detail_retry_backoff_secs: u64,
    pub page_load_timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub output_path: PathBuf,
    pub categories_path: PathBuf,
    pub selectors_path: Option<PathBuf>,
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
}
