pub mod app_config;
pub mod categories;
pub mod config;
pub mod products;
pub mod selectors;

use thiserror::Error;

pub use app_config::AppConfig;
pub use categories::{load_categories, parse_categories, CategoriesFile, CategoryConfig};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use products::{CatalogSnapshot, DetailRecord, ProductRecord, SENTINEL};
pub use selectors::{load_selectors, parse_selectors, SelectorSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    FileParse(#[source] serde_yaml::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
