use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One storefront category to walk. `slug` is the listing API path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub slug: String,
}

impl CategoryConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Categories in file order. Output ordering follows this order.
#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

impl CategoriesFile {
    /// Keeps only the categories whose slug appears in `slugs`, preserving
    /// file order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a requested slug is not configured.
    pub fn select(self, slugs: &[String]) -> Result<Vec<CategoryConfig>, ConfigError> {
        if slugs.is_empty() {
            return Ok(self.categories);
        }

        for slug in slugs {
            if !self.categories.iter().any(|c| &c.slug == slug) {
                return Err(ConfigError::Validation(format!(
                    "unknown category slug: '{slug}'"
                )));
            }
        }

        Ok(self
            .categories
            .into_iter()
            .filter(|c| slugs.contains(&c.slug))
            .collect())
    }
}

/// Load and validate the category enumeration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_categories(&content)
}

/// Parse and validate a categories document already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_categories(content: &str) -> Result<CategoriesFile, ConfigError> {
    let categories_file: CategoriesFile =
        serde_yaml::from_str(content).map_err(ConfigError::FileParse)?;

    validate_categories(&categories_file)?;

    Ok(categories_file)
}

fn validate_categories(categories_file: &CategoriesFile) -> Result<(), ConfigError> {
    if categories_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for category in &categories_file.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if !is_url_safe_slug(&category.slug) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has invalid slug '{}'; use lowercase letters, digits and '-'",
                category.name, category.slug
            )));
        }

        if !seen_names.insert(category.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                category.name
            )));
        }

        if !seen_slugs.insert(category.slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{}' (from category '{}')",
                category.slug, category.name
            )));
        }
    }

    Ok(())
}

fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
