//! Canonical product link construction.
//!
//! Every product has exactly one public locator, shaped
//! `{origin}/01/{gtin}` -- the `01` path segment is the GS1 application
//! identifier for "keyed by GTIN". The link is derived, never stored.

/// Build the canonical link for a GTIN under a base origin.
///
/// A trailing slash on the origin is trimmed so the result always has
/// a single separator.
///
/// # Examples
///
/// ```
/// use digilink_core::link::canonical_link;
///
/// assert_eq!(
///     canonical_link("https://example.com", "8499383300123"),
///     "https://example.com/01/8499383300123"
/// );
/// assert_eq!(
///     canonical_link("https://example.com/", "40123456"),
///     "https://example.com/01/40123456"
/// );
/// ```
pub fn canonical_link(origin: &str, gtin: &str) -> String {
    format!("{}/01/{}", origin.trim_end_matches('/'), gtin)
}
