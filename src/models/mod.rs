// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod conference;
mod config;
mod selectors;

// Re-export all public types
pub use conference::{ConferenceRecord, ExtractedFields, FeedEntry};
pub use config::{Config, CrawlerConfig, FailurePolicy, OutputConfig, PipelineConfig};
pub use selectors::DetailSelectors;

use serde::{Deserialize, Serialize};

/// A fetch that did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    /// Category whose crawl hit the failure
    pub category: String,
    /// URL that failed (feed or detail page)
    pub url: String,
    pub message: String,
}
