//! Utility functions and helpers.

pub mod date;
pub mod http;
pub mod log;

use url::Url;

/// Build the feed URL for a category by appending it to the base.
///
/// The name is appended verbatim and then percent-encoded by URL parsing,
/// so `"computer science"` becomes `cat=computer%20science`.
pub fn feed_url(base: &str, category: &str) -> crate::error::Result<String> {
    Ok(Url::parse(&format!("{base}{category}"))?.to_string())
}

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}
