use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder written for any scalar field that could not be extracted.
pub const SENTINEL: &str = "N/A";

/// Fields read from a rendered product page.
///
/// Each field is independent: `None` means that one lookup failed, and the
/// merge step substitutes [`SENTINEL`]. `Default` is the all-missing record
/// returned when every navigation attempt fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price_per_unit: Option<String>,
    pub weight_info: Option<String>,
    pub delivery_methods: Vec<String>,
}

impl DetailRecord {
    /// `true` when no field was extracted at all.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        *self == Self::default()
    }
}

/// One merged output row: listing summary fields plus rendered detail fields.
///
/// Serialized key order is the snapshot file's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    /// `final_price_incl_tax` exactly as the listing API returned it.
    pub price: serde_json::Value,
    pub price_per_unit: String,
    pub weight_info: String,
    /// Same value as `barcode`; the storefront exposes no separate SKU.
    pub sku: String,
    pub brand: String,
    pub category: String,
    pub product_url: String,
    pub image: String,
    pub barcode: String,
    pub description: String,
    /// `price.promotions` passed through untouched.
    pub promotion: serde_json::Value,
    pub delivery_methods: Vec<String>,
    pub date_scraped: DateTime<Utc>,
    /// Slug of the category whose listing produced this record. Not written
    /// to the snapshot file.
    #[serde(skip)]
    pub source_category: String,
}

/// Every record collected during one run, in category then listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub records: Vec<ProductRecord>,
    /// Set when the run stopped early on an external cancel request.
    pub cancelled: bool,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
