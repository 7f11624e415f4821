use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_flag_accepts_common_spellings() {
    assert_eq!(parse_flag("true"), Some(true));
    assert_eq!(parse_flag("YES"), Some(true));
    assert_eq!(parse_flag(" 1 "), Some(true));
    assert_eq!(parse_flag("off"), Some(false));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag("maybe"), None);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.listing_base_url, DEFAULT_LISTING_BASE_URL);
    assert_eq!(cfg.site_url, "https://www.bigc.co.th");
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.inter_request_delay_ms, 2000);
    assert_eq!(cfg.inter_category_delay_ms, 2000);
    assert_eq!(cfg.listing_timeout_retries, 10);
    assert_eq!(cfg.listing_timeout_backoff_secs, 5);
    assert_eq!(cfg.max_pages, 500);
    assert_eq!(cfg.detail_max_attempts, 2);
    assert_eq!(cfg.detail_retry_backoff_secs, 5);
    assert_eq!(cfg.page_load_timeout_secs, 30);
    assert_eq!(cfg.settle_delay_ms, 2000);
    assert_eq!(cfg.output_path, PathBuf::from("products.json"));
    assert_eq!(
        cfg.categories_path,
        PathBuf::from("./config/categories.yaml")
    );
    assert!(cfg.selectors_path.is_none());
    assert!(cfg.headless);
    assert!(cfg.chrome_path.is_none());
}

#[test]
fn build_app_config_trims_trailing_slash_from_urls() {
    let mut map = HashMap::new();
    map.insert("BIGC_LISTING_BASE_URL", "http://127.0.0.1:9000/data/en/category/");
    map.insert("BIGC_SITE_URL", "http://127.0.0.1:9000/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.listing_base_url, "http://127.0.0.1:9000/data/en/category");
    assert_eq!(cfg.site_url, "http://127.0.0.1:9000");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("BIGC_INTER_REQUEST_DELAY_MS", "0");
    map.insert("BIGC_DETAIL_MAX_ATTEMPTS", "4");
    map.insert("BIGC_PAGE_LOAD_TIMEOUT_SECS", "15");
    map.insert("BIGC_OUTPUT_PATH", "/tmp/out.json");
    map.insert("BIGC_SELECTORS_PATH", "./config/selectors.yaml");
    map.insert("BIGC_HEADLESS", "false");
    map.insert("BIGC_CHROME_PATH", "/usr/bin/chromium");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_request_delay_ms, 0);
    assert_eq!(cfg.detail_max_attempts, 4);
    assert_eq!(cfg.page_load_timeout_secs, 15);
    assert_eq!(cfg.output_path, PathBuf::from("/tmp/out.json"));
    assert_eq!(
        cfg.selectors_path,
        Some(PathBuf::from("./config/selectors.yaml"))
    );
    assert!(!cfg.headless);
    assert_eq!(cfg.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
}

#[test]
fn build_app_config_treats_blank_optional_path_as_unset() {
    let mut map = HashMap::new();
    map.insert("BIGC_SELECTORS_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.selectors_path.is_none());
}

#[test]
fn build_app_config_rejects_non_numeric_delay() {
    let mut map = HashMap::new();
    map.insert("BIGC_INTER_REQUEST_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIGC_INTER_REQUEST_DELAY_MS"),
        "expected InvalidEnvVar(BIGC_INTER_REQUEST_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_detail_attempts() {
    let mut map = HashMap::new();
    map.insert("BIGC_DETAIL_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIGC_DETAIL_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(BIGC_DETAIL_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_pages() {
    let mut map = HashMap::new();
    map.insert("BIGC_MAX_PAGES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIGC_MAX_PAGES"),
        "expected InvalidEnvVar(BIGC_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_bad_headless_flag() {
    let mut map = HashMap::new();
    map.insert("BIGC_HEADLESS", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIGC_HEADLESS"),
        "expected InvalidEnvVar(BIGC_HEADLESS), got: {result:?}"
    );
}
