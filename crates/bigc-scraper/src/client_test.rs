use super::*;

#[test]
fn listing_url_includes_page_one() {
    let url = listing_url("https://www.bigc.co.th/_next/data/abc/en/category", "beverages", 1)
        .unwrap();
    assert_eq!(
        url,
        "https://www.bigc.co.th/_next/data/abc/en/category/beverages.json?page=1"
    );
}

#[test]
fn listing_url_later_page() {
    let url = listing_url("http://127.0.0.1:8080/en/category", "grocery-bakery", 7).unwrap();
    assert_eq!(
        url,
        "http://127.0.0.1:8080/en/category/grocery-bakery.json?page=7"
    );
}

#[test]
fn listing_url_strips_trailing_slash() {
    let url = listing_url("http://127.0.0.1:8080/en/category/", "beverages", 2).unwrap();
    assert_eq!(url, "http://127.0.0.1:8080/en/category/beverages.json?page=2");
}

#[test]
fn listing_url_rejects_relative_base() {
    let result = listing_url("not-a-url", "beverages", 1);
    let err = result.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn product_url_uses_english_product_path() {
    assert_eq!(
        product_url("https://www.bigc.co.th", "singha-water-1-5l"),
        "https://www.bigc.co.th/en/product/singha-water-1-5l"
    );
}

#[test]
fn product_url_with_trailing_slash_and_empty_slug() {
    assert_eq!(
        product_url("https://www.bigc.co.th/", ""),
        "https://www.bigc.co.th/en/product/"
    );
}


#[test]
fn from_config_takes_every_timing_from_config() {
    let mut config =
        bigc_core::build_app_config(|_| Err(std::env::VarError::NotPresent)).unwrap();
    config.request_timeout_secs = 3;
    config.listing_timeout_retries = 4;
    config.listing_timeout_backoff_secs = 7;

    let client = ListingClient::from_config(&config).unwrap();
    assert_eq!(client.request_timeout(), Duration::from_secs(3));
    assert_eq!(
        client.timeout_policy(),
        RetryPolicy::new(5, Duration::from_secs(7))
    );
}

#[test]
fn invalid_user_agent_fails_to_build() {
    let result = ListingClient::new(
        "https://www.bigc.co.th",
        10,
        "bigc\nbroken",
        RetryPolicy::new(1, Duration::ZERO),
    );
    assert!(matches!(result, Err(ScraperError::Http(_))));
}
