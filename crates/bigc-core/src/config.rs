use crate::app_config::AppConfig;
use crate::ConfigError;

/// Listing API root observed on the live storefront. The build id segment
/// changes on every site deploy, so override it with `BIGC_LISTING_BASE_URL`.
pub const DEFAULT_LISTING_BASE_URL: &str =
    "https://www.bigc.co.th/_next/data/ygIhKgGTvvJ-jNQIx3BY5/en/category";

pub const DEFAULT_SITE_URL: &str = "https://www.bigc.co.th";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a
/// `HashMap` without `set_var`/`remove_var`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default)).ok_or_else(|| {
            invalid(
                var,
                "expected one of true/false/1/0/yes/no".to_string(),
            )
        })
    };

    let at_least_one = |var: &str, value: u32| -> Result<u32, ConfigError> {
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    };

    let log_level = or_default("BIGC_LOG_LEVEL", "info");
    let listing_base_url = or_default("BIGC_LISTING_BASE_URL", DEFAULT_LISTING_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let site_url = or_default("BIGC_SITE_URL", DEFAULT_SITE_URL)
        .trim_end_matches('/')
        .to_string();
    let user_agent = or_default("BIGC_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("BIGC_REQUEST_TIMEOUT_SECS", "10")?;
    let inter_request_delay_ms = parse_u64("BIGC_INTER_REQUEST_DELAY_MS", "2000")?;
    let inter_category_delay_ms = parse_u64("BIGC_INTER_CATEGORY_DELAY_MS", "2000")?;
    let listing_timeout_retries = parse_u32("BIGC_LISTING_TIMEOUT_RETRIES", "10")?;
    let listing_timeout_backoff_secs = parse_u64("BIGC_LISTING_TIMEOUT_BACKOFF_SECS", "5")?;
    let max_pages = at_least_one("BIGC_MAX_PAGES", parse_u32("BIGC_MAX_PAGES", "500")?)?;
    let detail_max_attempts = at_least_one(
        "BIGC_DETAIL_MAX_ATTEMPTS",
        parse_u32("BIGC_DETAIL_MAX_ATTEMPTS", "2")?,
    )?;
    let detail_retry_backoff_secs = parse_u64("BIGC_DETAIL_RETRY_BACKOFF_SECS", "5")?;
    let page_load_timeout_secs = parse_u64("BIGC_PAGE_LOAD_TIMEOUT_SECS", "30")?;
    let settle_delay_ms = parse_u64("BIGC_SETTLE_DELAY_MS", "2000")?;

    let output_path = PathBuf::from(or_default("BIGC_OUTPUT_PATH", "products.json"));
    let categories_path = PathBuf::from(or_default(
        "BIGC_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let selectors_path = optional_path("BIGC_SELECTORS_PATH");
    let headless = parse_bool("BIGC_HEADLESS", "true")?;
    let chrome_path = optional_path("BIGC_CHROME_PATH");

    Ok(AppConfig {
        log_level,
        listing_base_url,
        site_url,
        user_agent,
        request_timeout_secs,
        inter_request_delay_ms,
        inter_category_delay_ms,
        listing_timeout_retries,
        listing_timeout_backoff_secs,
        max_pages,
        detail_max_attempts,
        detail_retry_backoff_secs,
        page_load_timeout_secs,
        settle_delay_ms,
        output_path,
        categories_path,
        selectors_path,
        headless,
        chrome_path,
    })
}

/// Parse a boolean-ish env value. Returns `None` for anything unrecognized.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
