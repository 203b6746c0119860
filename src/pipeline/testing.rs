//! Test doubles shared by the pipeline tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::PageFetcher;
use crate::utils::feed_url;

pub const FEED_BASE: &str = "http://cfp.test/rss?cat=";

/// Config pointing at the fake feed host.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.feed_base_url = FEED_BASE.to_string();
    config
}

/// Serves canned pages by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Register a category feed listing `(title, link)` items.
    pub fn with_feed(self, category: &str, items: &[(&str, &str)]) -> Self {
        let url = feed_url(FEED_BASE, category).unwrap();
        self.with_page(&url, &feed_xml(items))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::crawl(url, "404 Not Found"))
    }
}

/// Minimal RSS document with one item per `(title, link)`.
pub fn feed_xml(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, link)| {
            format!(
                "<item><title>{title}</title><link>{link}</link><description>{title} [Online]</description></item>"
            )
        })
        .collect();
    format!(r#"<?xml version="1.0"?><rss version="2.0"><channel><title>CFPs</title>{items}</channel></rss>"#)
}

/// Detail page in the listing site's layout.
pub fn detail_page(deadline: &str, link: &str) -> String {
    format!(
        r#"<html><body><div></div><div></div><div></div><div></div>
<div><center><table>
<tr><td></td></tr><tr><td></td></tr>
<tr><td><a href="{link}">{link}</a></td></tr>
<tr><td></td></tr>
<tr><td><table><tr><td><table>
<tr><td><table><tr><td></td></tr><tr><td></td></tr>
<tr><td><span><span>Submission</span><span>Deadline</span><span>{deadline}</span></span></td></tr>
</table></td></tr>
<tr><td><table><tr><td></td></tr><tr><td><h5>Categories   computing</h5></td></tr></table></td></tr>
</table></td></tr></table></td></tr>
</table></center></div></body></html>"#
    )
}
