// src/pipeline/aggregate.rs

//! Cross-category aggregation: run every category, flatten, sort.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future;

use crate::error::Result;
use crate::models::{ConferenceRecord, Config, FetchFailure};
use crate::pipeline::category::{CategoryOutcome, CategoryPipeline};
use crate::services::PageFetcher;

/// Summary of an aggregation run.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Records sorted by deadline
    pub records: Vec<ConferenceRecord>,
    pub failures: Vec<FetchFailure>,
    pub category_total: usize,
    /// Feed entries seen across all categories
    pub entry_total: usize,
    /// Records removed as cross-category duplicates
    pub duplicates_removed: usize,
}

/// Runs the category pipeline over every category and merges the results.
pub struct Aggregator {
    pipeline: CategoryPipeline,
    dedupe: bool,
}

impl Aggregator {
    pub fn new(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        Ok(Self {
            pipeline: CategoryPipeline::new(config, fetcher)?,
            dedupe: config.pipeline.dedupe,
        })
    }

    /// Crawl all categories concurrently and return deadline-sorted records.
    ///
    /// Waits for every category to finish. Records are flattened in
    /// category order before sorting, which fixes the relative order of
    /// records with equal or unparseable deadlines.
    pub async fn run(&self, categories: &[String]) -> AggregateOutcome {
        let outcomes: Vec<CategoryOutcome> =
            future::join_all(categories.iter().map(|c| self.pipeline.run(c))).await;

        let mut aggregate = AggregateOutcome {
            category_total: categories.len(),
            ..AggregateOutcome::default()
        };

        for outcome in outcomes {
            log::info!(
                "Category '{}': {} records from {} entries ({} failures)",
                outcome.category,
                outcome.records.len(),
                outcome.entry_total,
                outcome.failures.len()
            );
            aggregate.entry_total += outcome.entry_total;
            aggregate.records.extend(outcome.records);
            aggregate.failures.extend(outcome.failures);
        }

        if self.dedupe {
            aggregate.duplicates_removed = dedupe_records(&mut aggregate.records);
        }

        sort_by_deadline(&mut aggregate.records);
        aggregate
    }
}

/// Stable ascending sort by parsed deadline; unparseable deadlines go last.
pub fn sort_by_deadline(records: &mut [ConferenceRecord]) {
    records.sort_by_cached_key(|record| {
        let date = record.deadline_date();
        (date.is_none(), date)
    });
}

/// Drop records whose canonical link was already seen. Returns how many
/// were removed.
pub fn dedupe_records(records: &mut Vec<ConferenceRecord>) -> usize {
    let before = records.len();
    let mut seen = HashSet::new();
    records.retain(|record| seen.insert(record.dedupe_key().to_string()));
    before - records.len()
}
