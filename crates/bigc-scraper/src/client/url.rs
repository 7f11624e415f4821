//! URL construction for listing pages and product detail pages.

use crate::error::ScraperError;

/// Builds `{base}/{slug}.json?page={page}`.
///
/// The `page` parameter is sent for page 1 as well.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base_url` does not parse as an
/// absolute URL.
pub fn listing_url(base_url: &str, slug: &str, page: u32) -> Result<String, ScraperError> {
    let raw = format!("{}/{slug}.json", base_url.trim_end_matches('/'));
    let mut url = reqwest::Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    url.query_pairs_mut()
        .append_pair("page", &page.to_string());

    Ok(url.to_string())
}

/// Builds the storefront product page URL `{site}/en/product/{slug}`.
#[must_use]
pub fn product_url(site_url: &str, slug: &str) -> String {
    format!("{}/en/product/{slug}", site_url.trim_end_matches('/'))
}
