//! Pathsift main entry point
//!
//! Command-line interface for the adaptive recursive web path scanner.

use anyhow::Context;
use clap::Parser;
use pathsift::config::{parse_excluded, validate, ScanConfig, WordlistSource};
use pathsift::crawler::crawl_origin;
use pathsift::output::{report_summary, write_results};
use pathsift::scanner::scan;
use pathsift::wordlist::{load_words, save_words, tokens_from_urls};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Crawl depth used for wordlist generation and crawl-only mode
const CRAWL_DEPTH: u32 = 10;

/// Page budget when crawling for wordlist generation
const WORDGEN_PAGE_BUDGET: usize = 2000;

/// Page budget for crawl-only mode
const CRAWL_ONLY_PAGE_BUDGET: usize = 20000;

/// Pathsift: adaptive recursive web path discovery
///
/// Probes candidate paths under a target origin from a wordlist, recursing
/// into hits per-branch while suppressing duplicate content, structural
/// loops, and reflective catch-all endpoints.
#[derive(Parser, Debug)]
#[command(name = "pathsift")]
#[command(version)]
#[command(about = "Adaptive recursive web path discovery", long_about = None)]
struct Cli {
    /// Base URL to scan, e.g. http://127.0.0.1/
    #[arg(short = 'u', long = "url")]
    url: String,

    /// Wordlist file; omit to auto-generate by crawling the target
    #[arg(short = 'w', long = "wordlist")]
    wordlist: Option<PathBuf>,

    /// Error tolerance: 1 stops at the first non-200 level, 2 allows one,
    /// and so on
    #[arg(short = 'e', long = "error-tolerance", default_value_t = 1)]
    error_tolerance: u32,

    /// Concurrent scan workers
    #[arg(short = 'c', long = "concurrency", default_value_t = 50)]
    concurrency: usize,

    /// Status codes to exclude from hits (comma/space-separated)
    #[arg(short = 'x', long = "exclude-status", default_value = "404")]
    exclude_status: String,

    /// Recurse into hits until the error tolerance is reached
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// Write surviving URLs to a file as well as stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Crawl the target and print discovered URLs, without scanning
    #[arg(long = "crawl-only", conflicts_with_all = ["wordlist", "recursive"])]
    crawl_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let base_url = Url::parse(&cli.url)
        .with_context(|| format!("invalid base URL: {}", cli.url))?;

    let mut config = ScanConfig::new(base_url).with_concurrency(cli.concurrency);
    config.error_tolerance = cli.error_tolerance;
    config.excluded_statuses = parse_excluded(&cli.exclude_status);
    config.recursive = cli.recursive;
    validate(&config).context("invalid configuration")?;

    if cli.crawl_only {
        return handle_crawl_only(&config).await;
    }

    let source = match cli.wordlist {
        Some(path) => WordlistSource::File(path),
        None => WordlistSource::Crawl,
    };
    let words = resolve_wordlist(&config, &source).await?;
    if words.is_empty() {
        anyhow::bail!("no words to scan with");
    }

    tracing::info!(
        "Scanning {} with {} words; mode={}; error-tolerance={}; concurrency={}; exclude={}",
        config.base_url,
        words.len(),
        if config.recursive { "recursive" } else { "single-level" },
        config.error_tolerance,
        config.concurrency,
        cli.exclude_status
    );

    let report = scan(&config, &words).await?;

    if report.root_reflective {
        tracing::warn!(
            "This endpoint returns the same response regardless of path; \
             scan skipped to avoid unbounded false positives"
        );
        return Ok(());
    }

    write_results(&report.urls, cli.output.as_deref())?;
    report_summary(&report);

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pathsift=info,warn"),
            1 => EnvFilter::new("pathsift=debug,info"),
            2 => EnvFilter::new("pathsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles --crawl-only: discover same-origin URLs and print them
async fn handle_crawl_only(config: &ScanConfig) -> anyhow::Result<()> {
    tracing::info!("Crawling {} (depth {})", config.base_url, CRAWL_DEPTH);
    let urls = crawl_origin(&config.base_url, CRAWL_DEPTH, CRAWL_ONLY_PAGE_BUDGET).await?;
    for url in &urls {
        println!("{}", url);
    }
    tracing::info!("Crawled {} URLs", urls.len());
    Ok(())
}

/// Resolves the probe vocabulary from the configured source.
///
/// Auto-generation crawls the origin, tokenizes the discovered URLs, and
/// persists the result to `wordlist.txt` for reuse; an empty generation is
/// fatal before any scan request is issued.
async fn resolve_wordlist(
    config: &ScanConfig,
    source: &WordlistSource,
) -> anyhow::Result<Vec<String>> {
    match source {
        WordlistSource::File(path) => {
            let words = load_words(path)?;
            tracing::info!("Loaded {} words from {}", words.len(), path.display());
            Ok(words)
        }
        WordlistSource::Crawl => {
            tracing::info!(
                "Auto-generating wordlist via crawl (depth {})",
                CRAWL_DEPTH
            );
            let urls = crawl_origin(&config.base_url, CRAWL_DEPTH, WORDGEN_PAGE_BUDGET).await?;
            let words = tokens_from_urls(&urls);
            tracing::info!(
                "Crawl discovered {} URLs; generated {} words",
                urls.len(),
                words.len()
            );
            if words.is_empty() {
                anyhow::bail!("auto-generation produced no words");
            }
            if let Err(e) = save_words(&words, std::path::Path::new("wordlist.txt")) {
                tracing::warn!("Could not persist generated wordlist: {}", e);
            }
            Ok(words)
        }
    }
}
