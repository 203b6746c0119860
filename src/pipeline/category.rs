// src/pipeline/category.rs

//! Per-category crawl: feed, then every detail page.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ConferenceRecord, Config, FailurePolicy, FeedEntry, FetchFailure};
use crate::services::{DetailExtractor, PageFetcher, normalize, parse_feed};
use crate::utils::{feed_url, resolve_url};

/// Result of crawling one category.
#[derive(Debug, Default)]
pub struct CategoryOutcome {
    pub category: String,
    /// Records in feed order
    pub records: Vec<ConferenceRecord>,
    pub failures: Vec<FetchFailure>,
    /// Entries listed by the feed, whether or not they were enriched
    pub entry_total: usize,
}

/// Crawls a single category feed and enriches each of its entries.
///
/// Every network request acquires a permit from the shared semaphore, so
/// the number of requests in flight stays bounded no matter how many
/// categories run at once.
pub struct CategoryPipeline {
    fetcher: Arc<dyn PageFetcher>,
    extractor: DetailExtractor,
    permits: Arc<Semaphore>,
    feed_base_url: String,
    policy: FailurePolicy,
    delay: Duration,
    buffer: usize,
}

impl CategoryPipeline {
    /// Create a pipeline with its own request bound from `config`.
    pub fn new(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let permits = Arc::new(Semaphore::new(config.crawler.max_concurrent.max(1)));
        Self::with_permits(config, fetcher, permits)
    }

    /// Create a pipeline sharing an existing request bound.
    pub fn with_permits(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        permits: Arc<Semaphore>,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: DetailExtractor::new(&config.selectors)?,
            permits,
            feed_base_url: config.crawler.feed_base_url.clone(),
            policy: config.pipeline.failure_policy,
            delay: Duration::from_millis(config.crawler.request_delay_ms),
            buffer: config.crawler.max_concurrent.max(1),
        })
    }

    /// Crawl one category.
    ///
    /// A feed failure yields an empty outcome with a single failure. Detail
    /// failures are handled according to the configured [`FailurePolicy`].
    pub async fn run(&self, category: &str) -> CategoryOutcome {
        let mut outcome = CategoryOutcome {
            category: category.to_string(),
            ..CategoryOutcome::default()
        };

        let url = match feed_url(&self.feed_base_url, category) {
            Ok(url) => url,
            Err(e) => {
                outcome.failures.push(self.failure(
                    category,
                    &format!("{}{}", self.feed_base_url, category),
                    &e,
                ));
                return outcome;
            }
        };

        let entries = match self.fetch_entries(&url).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to fetch feed for '{}' ({}): {}", category, url, e);
                outcome.failures.push(self.failure(category, &url, &e));
                return outcome;
            }
        };

        outcome.entry_total = entries.len();
        log::debug!("Category '{}': {} feed entries", category, entries.len());

        let results: Vec<(String, Result<ConferenceRecord>)> = stream::iter(entries)
            .map(|entry| async move {
                let link = entry.link.clone();
                (link, self.enrich(entry).await)
            })
            .buffered(self.buffer)
            .collect()
            .await;

        for (link, result) in results {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(e) => {
                    log::warn!("Failed to fetch detail page {}: {}", link, e);
                    outcome.failures.push(self.failure(category, &link, &e));
                }
            }
        }

        if self.policy == FailurePolicy::AbortCategory && !outcome.failures.is_empty() {
            log::warn!(
                "Dropping {} records of '{}' after {} failed detail fetches",
                outcome.records.len(),
                category,
                outcome.failures.len()
            );
            outcome.records.clear();
            let failed = std::mem::take(&mut outcome.failures);
            outcome.failures.push(FetchFailure {
                category: category.to_string(),
                url,
                message: format!(
                    "category aborted: {} of {} detail fetches failed (first: {}: {})",
                    failed.len(),
                    outcome.entry_total,
                    failed[0].url,
                    failed[0].message
                ),
            });
        }

        outcome
    }

    /// Fetch and parse the feed, resolving entry links against the feed URL.
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let body = self.fetch(url).await?;
        let base = Url::parse(url)?;

        Ok(parse_feed(&body)?
            .into_iter()
            .map(|mut entry| {
                entry.link = resolve_url(&base, &entry.link);
                entry
            })
            .collect())
    }

    /// Fetch one detail page and merge it with its feed entry.
    async fn enrich(&self, entry: FeedEntry) -> Result<ConferenceRecord> {
        let html = self.fetch(&entry.link).await?;
        let fields = self.extractor.extract(&html);
        let name = normalize(&entry.title);
        Ok(ConferenceRecord::merge(entry, fields, name))
    }

    /// Fetch under a permit, pausing afterwards when a delay is configured.
    async fn fetch(&self, url: &str) -> Result<String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AppError::crawl(url, e))?;

        let result = self.fetcher.fetch(url).await;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }

    fn failure(&self, category: &str, url: &str, error: &AppError) -> FetchFailure {
        FetchFailure {
            category: category.to_string(),
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
