//! Merge of listing summary fields and rendered detail fields into the
//! output [`ProductRecord`].

use chrono::{DateTime, Utc};
use serde_json::Value;

use bigc_core::{DetailRecord, ProductRecord, SENTINEL};

use crate::barcode::extract_barcode;
use crate::client::product_url;
use crate::types::SummaryItem;

/// Everything a [`ProductRecord`] takes from the listing side, derived
/// before the detail page is visited.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFields {
    pub image: String,
    pub barcode: String,
    pub product_url: String,
    pub price: Value,
    pub promotion: Value,
}

impl SummaryFields {
    #[must_use]
    pub fn from_item(item: &SummaryItem, site_url: &str) -> Self {
        let image = item.thumbnail().to_owned();
        Self {
            barcode: extract_barcode(&image),
            product_url: product_url(site_url, item.product_slug()),
            price: item.price_value(),
            promotion: item.promotions(),
            image,
        }
    }
}

/// Combines both halves; every missing detail field becomes `"N/A"`.
#[must_use]
pub fn merge_product(
    summary: SummaryFields,
    detail: DetailRecord,
    source_category: &str,
    scraped_at: DateTime<Utc>,
) -> ProductRecord {
    let or_sentinel = |value: Option<String>| value.unwrap_or_else(|| SENTINEL.to_owned());

    ProductRecord {
        name: or_sentinel(detail.name),
        price: summary.price,
        price_per_unit: or_sentinel(detail.price_per_unit),
        weight_info: or_sentinel(detail.weight_info),
        sku: summary.barcode.clone(),
        brand: or_sentinel(detail.brand),
        category: or_sentinel(detail.category),
        product_url: summary.product_url,
        image: summary.image,
        barcode: summary.barcode,
        description: or_sentinel(detail.description),
        promotion: summary.promotion,
        delivery_methods: detail.delivery_methods,
        date_scraped: scraped_at,
        source_category: source_category.to_owned(),
    }
}
