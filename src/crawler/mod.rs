//! Same-origin URL discovery crawler
//!
//! Seeds automatic wordlist generation: starting from the scan origin, pages
//! are fetched breadth-first and candidate URLs harvested from links,
//! resource attributes, and raw script references. Only same-origin URLs are
//! followed, bounded by a depth limit and a page budget.

mod extractor;

pub use extractor::extract_candidate_urls;

use crate::{PathsiftError, Result, UrlError};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Concurrent page fetches per crawl level
const CRAWL_WORKERS: usize = 64;

/// Maximum bytes read from a single page body
const PAGE_BODY_CAP: usize = 2 * 1024 * 1024;

/// Asset extensions that never yield navigable paths
const SKIP_EXTENSIONS: &[&str] = &[
    ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff", ".woff2", ".ttf",
    ".eot",
];

/// Bounds for a crawl run
#[derive(Debug, Clone)]
pub struct CrawlLimits {
    /// Maximum link depth from the start URL
    pub max_depth: u32,
    /// Maximum number of distinct URLs to discover
    pub max_pages: usize,
}

/// Discovers same-origin URLs reachable from `start`.
///
/// Returns the sorted set of discovered URLs (fetched or not), capped at
/// `max_pages`. Pages answering 404 are recorded but not expanded; transport
/// errors skip the page.
pub async fn crawl(start: &Url, limits: &CrawlLimits) -> Result<Vec<String>> {
    if start.host_str().is_none() {
        return Err(UrlError::MissingHost.into());
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_idle_timeout(Duration::from_secs(15))
        .gzip(true)
        .brotli(true)
        .build()?;

    let mut discovered: HashSet<String> = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();
    discovered.insert(start.as_str().to_string());

    let semaphore = Arc::new(Semaphore::new(CRAWL_WORKERS));
    let mut frontier = vec![start.clone()];

    for depth in 0..=limits.max_depth {
        if frontier.is_empty() {
            break;
        }
        tracing::debug!(
            "Crawl depth {}: {} pages queued, {} discovered",
            depth,
            frontier.len(),
            discovered.len()
        );

        let mut fetches = JoinSet::new();
        for url in frontier.drain(..) {
            if !visited.insert(url.as_str().to_string()) {
                continue;
            }
            let client = client.clone();
            let semaphore = Arc::clone(&semaphore);
            fetches.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                fetch_page(&client, &url).await.map(|body| (url, body))
            });
        }

        let mut next = Vec::new();
        while let Some(joined) = fetches.join_next().await {
            let (page_url, body) = match joined {
                Ok(Some(page)) => page,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!("Crawl fetch task failed: {}", e);
                    continue;
                }
            };

            for link in extract_candidate_urls(&body, &page_url) {
                if !same_origin(&link, start) || has_skipped_extension(link.path()) {
                    continue;
                }
                if discovered.len() >= limits.max_pages {
                    break;
                }
                if discovered.insert(link.as_str().to_string()) {
                    next.push(link);
                }
            }
        }
        frontier = next;
    }

    let mut urls: Vec<String> = discovered.into_iter().collect();
    urls.sort();
    Ok(urls)
}

/// Convenience wrapper that maps transport-level failures of the whole crawl
/// into a crate error with context
pub async fn crawl_origin(start: &Url, max_depth: u32, max_pages: usize) -> Result<Vec<String>> {
    crawl(
        start,
        &CrawlLimits {
            max_depth,
            max_pages,
        },
    )
    .await
    .map_err(|e| PathsiftError::Crawl(format!("crawl of {} failed: {}", start, e)))
}

/// Fetches one page body, capped at [`PAGE_BODY_CAP`] bytes.
///
/// Returns `None` for transport errors and for 404s, which by definition
/// link nowhere useful.
async fn fetch_page(client: &Client, url: &Url) -> Option<String> {
    let response = match client.get(url.clone()).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::trace!("Crawl fetch {} failed: {}", url, e);
            return None;
        }
    };

    if response.status().as_u16() == 404 {
        return None;
    }

    let mut body: Vec<u8> = Vec::new();
    let mut response = response;
    while let Ok(Some(chunk)) = response.chunk().await {
        let remaining = PAGE_BODY_CAP - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Some(String::from_utf8_lossy(&body).into_owned())
}

fn same_origin(url: &Url, start: &Url) -> bool {
    url.scheme() == start.scheme()
        && url.host_str() == start.host_str()
        && url.port_or_known_default() == start.port_or_known_default()
}

fn has_skipped_extension(path: &str) -> bool {
    let lower = path.to_lowercase();
    SKIP_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_matches_host_and_scheme() {
        let start = Url::parse("http://example.com/").unwrap();
        assert!(same_origin(
            &Url::parse("http://example.com/page").unwrap(),
            &start
        ));
        assert!(!same_origin(
            &Url::parse("http://other.com/page").unwrap(),
            &start
        ));
        assert!(!same_origin(
            &Url::parse("https://example.com/page").unwrap(),
            &start
        ));
    }

    #[test]
    fn test_same_origin_distinguishes_ports() {
        let start = Url::parse("http://example.com:8080/").unwrap();
        assert!(!same_origin(
            &Url::parse("http://example.com/page").unwrap(),
            &start
        ));
        assert!(same_origin(
            &Url::parse("http://example.com:8080/x").unwrap(),
            &start
        ));
    }

    #[test]
    fn test_skipped_extensions() {
        assert!(has_skipped_extension("/style/main.css"));
        assert!(has_skipped_extension("/img/LOGO.PNG"));
        assert!(!has_skipped_extension("/api/users"));
        assert!(!has_skipped_extension("/report.pdf"));
    }
}
