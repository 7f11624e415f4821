pub mod barcode;
pub mod catalog;
pub mod client;
pub mod detail;
pub mod error;
pub mod extract;
pub mod merge;
pub mod retry;
pub mod run;
pub mod session;
pub mod types;

pub use barcode::extract_barcode;
pub use catalog::{collect_category, CatalogSettings, CategoryOutcome, PaginationEnd};
pub use client::{listing_url, product_url, ListingClient, ListingPage};
pub use detail::{fetch_details, DetailFetchSettings};
pub use error::ScraperError;
pub use extract::{extract_details, DetailField};
pub use merge::{merge_product, SummaryFields};
pub use retry::RetryPolicy;
pub use run::{run_catalog, RunSettings};
pub use session::{BrowserSession, ChromiumLauncher, ChromiumSession, SessionLauncher};
pub use types::{ListingResponse, SummaryItem};
