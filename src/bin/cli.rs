//! CFP Crawler CLI
//!
//! Crawls call-for-papers feeds and writes a deadline-sorted CSV.

use std::path::PathBuf;
use std::sync::Arc;

use cfp_crawler::{
    error::Result,
    models::{Config, FailurePolicy},
    pipeline,
    services::{DetailExtractor, HttpFetcher, PageFetcher, normalize},
    storage::LocalStorage,
};
use clap::{Parser, Subcommand};

/// CFP Crawler - call-for-papers aggregator
#[derive(Parser, Debug)]
#[command(
    name = "cfp-crawler",
    version,
    about = "Aggregates call-for-papers listings into a deadline-sorted CSV"
)]

struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl all categories and export the CSV
    Crawl {
        /// Export path (default: output.path from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop duplicate conferences listed under several categories
        #[arg(long)]
        dedupe: bool,

        /// Drop a whole category when any of its detail pages fails
        #[arg(long)]
        abort_category: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Print the canonical name for each title
    Normalize {
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Fetch one detail page and print the extracted fields as JSON
    Inspect { url: String },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl {
            output,
            dedupe,
            abort_category,
        } => {
            if let Some(path) = output {
                config.output.path = path;
            }
            if dedupe {
                config.pipeline.dedupe = true;
            }
            if abort_category {
                config.pipeline.failure_policy = FailurePolicy::AbortCategory;
            }
            config.validate()?;

            let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
            let storage = LocalStorage::from_config(&config.output);
            let summary = pipeline::run_crawler(&config, fetcher, &storage).await?;

            log::info!(
                "Crawl complete: {} records, {} failures",
                summary.record_count,
                summary.failure_count
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} categories)", config.categories.len());
            log::info!("  Feed base: {}", config.crawler.feed_base_url);
            log::info!("  Max concurrent requests: {}", config.crawler.max_concurrent);
            log::info!("  Failure policy: {:?}", config.pipeline.failure_policy);
        }

        Command::Normalize { titles } => {
            for title in titles {
                println!("{}", normalize(&title));
            }
        }

        Command::Inspect { url } => {
            let extractor = DetailExtractor::new(&config.selectors)?;
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let html = fetcher.fetch(&url).await?;
            let fields = extractor.extract(&html);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
    }

    Ok(())
}
