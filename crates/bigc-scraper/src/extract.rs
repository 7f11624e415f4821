//! Detail extraction from a rendered product page.
//!
//! Each field is an independent rule: one selector, one lookup, one
//! `Option<String>`. A missing element or a failed lookup only blanks that
//! field; the remaining rules still run. Nothing here retries or navigates.

use bigc_core::{DetailRecord, SelectorSet};

use crate::session::BrowserSession;

/// Scalar fields read from the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Name,
    Description,
    Brand,
    Category,
    PricePerUnit,
    WeightInfo,
}

impl DetailField {
    pub const ALL: [DetailField; 6] = [
        DetailField::Name,
        DetailField::Description,
        DetailField::Brand,
        DetailField::Category,
        DetailField::PricePerUnit,
        DetailField::WeightInfo,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DetailField::Name => "name",
            DetailField::Description => "description",
            DetailField::Brand => "brand",
            DetailField::Category => "category",
            DetailField::PricePerUnit => "price_per_unit",
            DetailField::WeightInfo => "weight_info",
        }
    }

    /// The configured selector for this field.
    #[must_use]
    pub fn selector(self, selectors: &SelectorSet) -> &str {
        match self {
            DetailField::Name => &selectors.name,
            DetailField::Description => &selectors.description,
            DetailField::Brand => &selectors.brand,
            DetailField::Category => &selectors.category,
            DetailField::PricePerUnit => &selectors.price_per_unit,
            DetailField::WeightInfo => &selectors.weight_info,
        }
    }

    fn slot(self, record: &mut DetailRecord) -> &mut Option<String> {
        match self {
            DetailField::Name => &mut record.name,
            DetailField::Description => &mut record.description,
            DetailField::Brand => &mut record.brand,
            DetailField::Category => &mut record.category,
            DetailField::PricePerUnit => &mut record.price_per_unit,
            DetailField::WeightInfo => &mut record.weight_info,
        }
    }
}

/// Reads every detail field from the session's current page.
///
/// Never fails: a field whose lookup misses is left `None`, and delivery
/// methods fall back to an empty list. Calling this twice on an unchanged
/// page yields equal records.
pub async fn extract_details<S>(session: &S, selectors: &SelectorSet) -> DetailRecord
where
    S: BrowserSession + ?Sized,
{
    let mut record = DetailRecord::default();

    for field in DetailField::ALL {
        *field.slot(&mut record) =
            extract_text(session, field.as_str(), field.selector(selectors)).await;
    }

    record.delivery_methods =
        extract_list(session, "delivery_methods", &selectors.delivery_methods).await;

    record
}

/// Trimmed text of the first match, `None` when absent or the lookup fails.
async fn extract_text<S>(session: &S, field: &str, selector: &str) -> Option<String>
where
    S: BrowserSession + ?Sized,
{
    match session.text(selector).await {
        Ok(Some(text)) => Some(text.trim().to_owned()),
        Ok(None) => {
            tracing::debug!(field, selector, "detail element not found");
            None
        }
        Err(e) => {
            tracing::debug!(field, selector, error = %e, "detail element lookup failed");
            None
        }
    }
}

/// Trimmed text of every match, empty when the lookup fails.
async fn extract_list<S>(session: &S, field: &str, selector: &str) -> Vec<String>
where
    S: BrowserSession + ?Sized,
{
    match session.texts(selector).await {
        Ok(texts) => texts.into_iter().map(|t| t.trim().to_owned()).collect(),
        Err(e) => {
            tracing::debug!(field, selector, error = %e, "detail list lookup failed");
            Vec::new()
        }
    }
}
