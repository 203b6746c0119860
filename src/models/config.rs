//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::DetailSelectors;
use crate::services::DetailExtractor;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Subject categories to crawl, one feed request each
    #[serde(default = "defaults::categories")]
    pub categories: Vec<String>,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Aggregation behavior
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Export destinations
    #[serde(default)]
    pub output: OutputConfig,

    /// Extraction rules for detail pages
    #[serde(default)]
    pub selectors: DetailSelectors,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.categories.is_empty() {
            return Err(AppError::validation("No categories defined"));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(AppError::validation("Category names must not be blank"));
        }
        url::Url::parse(&self.crawler.feed_base_url)?;
        DetailExtractor::new(&self.selectors)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: defaults::categories(),
            crawler: CrawlerConfig::default(),
            pipeline: PipelineConfig::default(),
            output: OutputConfig::default(),
            selectors: DetailSelectors::default(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum requests in flight across all categories
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Pause after each request in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,

    /// Feed URL prefix; the category name is appended verbatim
    #[serde(default = "defaults::feed_base_url")]
    pub feed_base_url: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            request_delay_ms: 0,
            feed_base_url: defaults::feed_base_url(),
        }
    }
}

/// What happens to a category when one of its detail pages fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Drop only the failing entry and keep the rest of the category.
    #[default]
    SkipEntry,
    /// Drop every record of the category.
    AbortCategory,
}

/// Aggregation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Remove records sharing a canonical link (first occurrence wins)
    #[serde(default)]
    pub dedupe: bool,
}

/// Export destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV export path
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,

    /// Failure report path, written only when something failed
    #[serde(default = "defaults::failures_path")]
    pub failures_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
            failures_path: defaults::failures_path(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn categories() -> Vec<String> {
        [
            "computer science",
            "security",
            "software engineering",
            "information technology",
            "communications",
            "networking",
            "information systems",
            "databases",
            "networks",
            "computer engineering",
            "semantic web",
            "software",
            "distributed systems",
            "blockchain",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; cfp-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        16
    }
    pub fn feed_base_url() -> String {
        "http://www.wikicfp.com/cfp/rss?cat=".into()
    }

    // Output defaults
    pub fn output_path() -> PathBuf {
        PathBuf::from("conferences.csv")
    }
    pub fn failures_path() -> PathBuf {
        PathBuf::from("failures.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "categories = [\"blockchain\"]\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.categories, vec!["blockchain".to_string()]);
        assert_eq!(config.crawler.max_concurrent, 16);
    }

    #[test]
    fn load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml"));
        assert_eq!(config.categories.len(), 14);
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_categories() {
        let mut config = Config::default();
        config.categories.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.note_cell = "[[invalid".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn default_categories_are_compiled_in() {
        let config = Config::default();
        assert_eq!(config.categories.len(), 14);
        assert_eq!(config.categories[0], "computer science");
        assert_eq!(config.categories[13], "blockchain");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            categories = ["security"]

            [crawler]
            max_concurrent = 4

            [pipeline]
            failure_policy = "abort_category"
            "#,
        )
        .unwrap();

        assert_eq!(config.categories, vec!["security"]);
        assert_eq!(config.crawler.max_concurrent, 4);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.pipeline.failure_policy, FailurePolicy::AbortCategory);
        assert!(!config.pipeline.dedupe);
        assert_eq!(config.output.path, PathBuf::from("conferences.csv"));
        assert_eq!(config.selectors, DetailSelectors::default());
    }
}
