//! Listing API response types for `GET {base}/{slug}.json?page=N`.
//!
//! The endpoint is the storefront's Next.js data route, so the product list
//! sits several levels deep:
//!
//! ```text
//! pageProps.productCategory.products_summary.{products: [...], total: int}
//! ```
//!
//! Past the last page the route still answers 200 but `products` is `[]`
//! (or the whole `products_summary` object is missing). Every segment is
//! optional here and a missing one decodes to an empty list rather than an
//! error, so "no more products" and "shape changed" look the same to the
//! paginator. Both end the category.
//!
//! Summary items carry far more than we read (names, stock, labels). Only
//! the fields that feed a `ProductRecord` are modelled; serde ignores the rest.

use serde::Deserialize;
use serde_json::Value;

use bigc_core::SENTINEL;

/// Top-level response body.
#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(rename = "pageProps", default)]
    pub page_props: Option<PageProps>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageProps {
    #[serde(rename = "productCategory", default)]
    pub product_category: Option<ProductCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductCategory {
    #[serde(default)]
    pub products_summary: Option<ProductsSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductsSummary {
    #[serde(default)]
    pub products: Option<Vec<SummaryItem>>,
    /// Category-wide product count. Observed as an integer; kept loose so a
    /// float or string here cannot fail the whole page.
    #[serde(default)]
    pub total: Option<Value>,
}

impl ListingResponse {
    fn summary(&self) -> Option<&ProductsSummary> {
        self.page_props
            .as_ref()?
            .product_category
            .as_ref()?
            .products_summary
            .as_ref()
    }

    /// Reported category total, `0` when absent or non-numeric.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.summary()
            .and_then(|s| s.total.as_ref())
            .and_then(|t| t.as_u64().or_else(|| t.as_str()?.parse().ok()))
            .unwrap_or(0)
    }

    /// Consumes the response and returns the page's summary items, empty if
    /// any path segment is missing.
    #[must_use]
    pub fn into_products(self) -> Vec<SummaryItem> {
        self.page_props
            .and_then(|p| p.product_category)
            .and_then(|c| c.products_summary)
            .and_then(|s| s.products)
            .unwrap_or_default()
    }
}

/// One entry of a listing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryItem {
    /// CDN URL of the product thumbnail. The barcode is embedded in its path.
    #[serde(default)]
    pub thumbnail_image: Option<String>,

    /// Product slug for `{site}/en/product/{slug}`.
    #[serde(default)]
    pub slug: Option<String>,

    /// Shelf price including VAT. Usually a number; passed through raw.
    #[serde(default)]
    pub final_price_incl_tax: Option<Value>,

    #[serde(default)]
    pub price: Option<SummaryPrice>,
}

/// Nested price block; only `promotions` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryPrice {
    #[serde(default)]
    pub promotions: Option<Value>,
}

impl SummaryItem {
    /// Thumbnail URL, or the sentinel when absent.
    #[must_use]
    pub fn thumbnail(&self) -> &str {
        self.thumbnail_image.as_deref().unwrap_or(SENTINEL)
    }

    /// Product slug, empty when absent.
    #[must_use]
    pub fn product_slug(&self) -> &str {
        self.slug.as_deref().unwrap_or_default()
    }

    /// Raw price value, or the sentinel string when absent.
    #[must_use]
    pub fn price_value(&self) -> Value {
        self.final_price_incl_tax
            .clone()
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| Value::String(SENTINEL.to_owned()))
    }

    /// Raw promotions value, or an empty array when absent.
    #[must_use]
    pub fn promotions(&self) -> Value {
        self.price
            .as_ref()
            .and_then(|p| p.promotions.clone())
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }
}
