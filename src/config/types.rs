use std::collections::HashSet;
use std::path::PathBuf;
use url::Url;

/// Default number of concurrent scan workers
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Default consecutive non-200 responses tolerated along a branch
pub const DEFAULT_ERROR_TOLERANCE: u32 = 1;

/// Queue slots reserved per worker; recursion batches that do not fit are
/// dropped rather than queued
pub const QUEUE_SLOTS_PER_WORKER: usize = 500;

/// Where the probe vocabulary comes from.
///
/// An explicit enumerated mode: either a wordlist file supplied by the
/// operator, or a vocabulary generated by crawling the target origin and
/// tokenizing the discovered URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordlistSource {
    /// Load words from a file, one per line
    File(PathBuf),
    /// Crawl the origin and tokenize discovered URLs
    Crawl,
}

/// Configuration for a single scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Origin the scan is rooted at; path always ends with `/`
    pub base_url: Url,

    /// Maximum consecutive non-200 responses along an ancestor chain before
    /// recursion stops (1 = stop at the first non-200)
    pub error_tolerance: u32,

    /// Number of concurrent scan workers
    pub concurrency: usize,

    /// Status codes excluded from "hit" classification
    pub excluded_statuses: HashSet<u16>,

    /// Whether hits may spawn deeper probe levels
    pub recursive: bool,

    /// Bounded job queue capacity; recursion batches larger than the free
    /// capacity are dropped whole
    pub queue_capacity: usize,
}

impl ScanConfig {
    /// Creates a configuration with default tuning for the given origin.
    ///
    /// The base URL's path is normalized to end with `/` so the origin
    /// behaves as a directory when probe paths are joined onto it.
    pub fn new(mut base_url: Url) -> Self {
        ensure_directory_path(&mut base_url);
        Self {
            base_url,
            error_tolerance: DEFAULT_ERROR_TOLERANCE,
            concurrency: DEFAULT_CONCURRENCY,
            excluded_statuses: default_excluded_statuses(),
            recursive: false,
            queue_capacity: DEFAULT_CONCURRENCY * QUEUE_SLOTS_PER_WORKER,
        }
    }

    /// Sets the worker count and re-derives the queue capacity from it
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self.queue_capacity = concurrency * QUEUE_SLOTS_PER_WORKER;
        self
    }
}

/// The default exclusion set: plain 404s are not hits
pub fn default_excluded_statuses() -> HashSet<u16> {
    let mut set = HashSet::new();
    set.insert(404);
    set
}

/// Parses a comma/space/tab-separated list of status codes.
///
/// Entries that do not parse as status codes are ignored; an empty input
/// yields an empty set (every status is a hit).
pub fn parse_excluded(statuses: &str) -> HashSet<u16> {
    statuses
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|s| s.trim().parse::<u16>().ok())
        .collect()
}

fn ensure_directory_path(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_excluded_single() {
        let set = parse_excluded("404");
        assert_eq!(set.len(), 1);
        assert!(set.contains(&404));
    }

    #[test]
    fn test_parse_excluded_mixed_separators() {
        let set = parse_excluded("404, 500\t403 301");
        assert_eq!(set.len(), 4);
        assert!(set.contains(&404));
        assert!(set.contains(&500));
        assert!(set.contains(&403));
        assert!(set.contains(&301));
    }

    #[test]
    fn test_parse_excluded_ignores_junk() {
        let set = parse_excluded("404,abc,,999999");
        assert_eq!(set.len(), 1);
        assert!(set.contains(&404));
    }

    #[test]
    fn test_parse_excluded_empty() {
        assert!(parse_excluded("").is_empty());
    }

    #[test]
    fn test_parse_excluded_matches_default() {
        assert_eq!(parse_excluded("404"), default_excluded_statuses());
    }

    #[test]
    fn test_new_appends_trailing_slash() {
        let config = ScanConfig::new(Url::parse("http://example.com/app").unwrap());
        assert_eq!(config.base_url.path(), "/app/");
    }

    #[test]
    fn test_new_keeps_existing_slash() {
        let config = ScanConfig::new(Url::parse("http://example.com/").unwrap());
        assert_eq!(config.base_url.path(), "/");
    }

    #[test]
    fn test_with_concurrency_rederives_capacity() {
        let config = ScanConfig::new(Url::parse("http://example.com/").unwrap())
            .with_concurrency(4);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.queue_capacity, 4 * QUEUE_SLOTS_PER_WORKER);
    }
}
