//! CSS selectors for the product detail page.
//!
//! The storefront ships CSS-module class names with build hashes
//! (`description_desc__7MwoO`), so selectors drift between deploys. They live
//! in configuration and the built-in set is only a starting point.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One selector per detail field. Keys missing from a YAML file keep the
/// built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorSet {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub price_per_unit: String,
    pub weight_info: String,
    /// Matches every delivery-method entry, not a container.
    pub delivery_methods: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            name: "h1#pdp_product-title".to_string(),
            description: "#pdp_desktop-desc .description_desc__7MwoO".to_string(),
            brand: "#pdp_brand-title".to_string(),
            category: "#pdp_category-title a".to_string(),
            price_per_unit: "#pdp_product-price-new .productDetail_product_price_new__TKGLM"
                .to_string(),
            weight_info: "#pdp_product-sellInKg .productDetail_weight-description__zPT27"
                .to_string(),
            delivery_methods:
                ".shipping_section_shipping__bOz4_ .shipping_shipping_item__bzHrT".to_string(),
        }
    }
}

impl SelectorSet {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("brand", &self.brand),
            ("category", &self.category),
            ("price_per_unit", &self.price_per_unit),
            ("weight_info", &self.weight_info),
            ("delivery_methods", &self.delivery_methods),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, selector) in self.entries() {
            if selector.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "selector for '{field}' must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

/// Load the selector set, or the built-in defaults when `path` is `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or has an empty selector.
pub fn load_selectors(path: Option<&Path>) -> Result<SelectorSet, ConfigError> {
    let Some(path) = path else {
        return Ok(SelectorSet::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_selectors(&content)
}

/// Parse and validate a selector document already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or a selector is empty.
pub fn parse_selectors(content: &str) -> Result<SelectorSet, ConfigError> {
    let selectors: SelectorSet = serde_yaml::from_str(content).map_err(ConfigError::FileParse)?;
    selectors.validate()?;
    Ok(selectors)
}
