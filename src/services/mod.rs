//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Page retrieval (`PageFetcher`, `HttpFetcher`)
//! - Feed reading (`parse_feed`)
//! - Detail page extraction (`DetailExtractor`)
//! - Conference name normalization (`normalize`)

mod extractor;
mod feed;
mod fetcher;
mod normalizer;

pub use extractor::DetailExtractor;
pub use feed::parse_feed;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use normalizer::normalize;
