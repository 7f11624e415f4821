use std::sync::LazyLock;

use regex::Regex;

use bigc_core::SENTINEL;

/// A 12-13 digit path segment: UPC-A or EAN-13 as the CDN stores them.
static BARCODE_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([0-9]{12,13})/").expect("valid regex"));

/// Derives the product barcode from its thumbnail URL.
///
/// The CDN files thumbnails under a directory named after the barcode, e.g.
/// `https://cdn/x/8851234567890/y.jpg`. Returns the first 12-13 digit run
/// bounded by `/` on both sides, or `"N/A"` when there is none.
#[must_use]
pub fn extract_barcode(thumbnail_url: &str) -> String {
    BARCODE_SEGMENT_RE
        .captures(thumbnail_url)
        .and_then(|c| c.get(1))
        .map_or_else(|| SENTINEL.to_owned(), |m| m.as_str().to_owned())
}
