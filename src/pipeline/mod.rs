//! Pipeline entry points for crawler operations.
//!
//! - `CategoryPipeline`: Crawl one category feed and its detail pages
//! - `Aggregator`: Crawl all categories and sort by deadline
//! - `run_crawler`: Aggregate and export

pub mod aggregate;
pub mod category;
pub mod crawl;

#[cfg(test)]
mod testing;

pub use aggregate::{AggregateOutcome, Aggregator, dedupe_records, sort_by_deadline};
pub use category::{CategoryOutcome, CategoryPipeline};
pub use crawl::{CrawlSummary, run_crawler};
