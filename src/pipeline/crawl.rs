// src/pipeline/crawl.rs

//! Full crawl: aggregate every category and export the result.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::aggregate::Aggregator;
use crate::services::PageFetcher;
use crate::storage::ExportStorage;
use crate::utils::log::{header, step, sub_item, summary};

/// What a crawl produced.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub record_count: usize,
    pub entry_total: usize,
    pub failure_count: usize,
    pub export_location: PathBuf,
    pub failures_location: Option<PathBuf>,
}

/// Run the crawler over `config.categories` and write the export.
///
/// Fetch failures never abort the run; they are reported in the summary
/// and in the failure report. Only export (I/O) errors are returned.
pub async fn run_crawler(
    config: &Config,
    fetcher: Arc<dyn PageFetcher>,
    storage: &dyn ExportStorage,
) -> Result<CrawlSummary> {
    let start_time = Utc::now();
    header("CFP Crawler");

    step(
        1,
        2,
        &format!("Crawling {} categories", config.categories.len()),
    );
    let aggregator = Aggregator::new(config, fetcher)?;
    let outcome = aggregator.run(&config.categories).await;

    step(2, 2, "Exporting records");
    let metadata = storage.write_records(&outcome.records).await?;
    sub_item(&format!(
        "{} records written to {} at {}",
        metadata.record_count,
        metadata.location.display(),
        metadata.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let failures_location = storage.write_failures(&outcome.failures).await?;
    if let Some(path) = &failures_location {
        log::warn!(
            "{} fetches failed; see {}",
            outcome.failures.len(),
            path.display()
        );
    }

    let elapsed = Utc::now() - start_time;
    summary(
        "Crawl Results",
        &[
            ("Categories", outcome.category_total.to_string()),
            ("Feed entries", outcome.entry_total.to_string()),
            ("Records exported", metadata.record_count.to_string()),
            ("Failures", outcome.failures.len().to_string()),
            ("Duplicates removed", outcome.duplicates_removed.to_string()),
            ("Elapsed", format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0)),
        ],
    );

    Ok(CrawlSummary {
        record_count: metadata.record_count,
        entry_total: outcome.entry_total,
        failure_count: outcome.failures.len(),
        export_location: metadata.location,
        failures_location,
    })
}
