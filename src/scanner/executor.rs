//! Request execution
//!
//! One GET per distinct URL for the lifetime of the run: the seen set is
//! checked-and-inserted atomically before any request is dispatched, so
//! duplicate probes are impossible by construction rather than by policy.

use crate::scanner::fingerprint::{fingerprint_response, Fingerprint};
use crate::scanner::scheduler::RunCounters;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Builds the pooled HTTP client shared by all scan workers.
///
/// Connection reuse is sized to the worker count; redirects follow the
/// client default. Timeouts bound every suspension point in the executor.
pub fn build_http_client(concurrency: usize) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("pathsift/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(concurrency * 2)
        .gzip(true)
        .brotli(true)
        .build()
}

/// A classified response from a completed probe
#[derive(Debug, Clone)]
pub struct ClassifiedResponse {
    /// HTTP status code
    pub status: u16,
    /// Content fingerprint; present only for 200 responses
    pub fingerprint: Option<Fingerprint>,
    /// Whether the status is outside the user's exclusion set
    pub hit: bool,
}

/// Outcome of asking the executor to probe a URL
#[derive(Debug)]
pub enum RequestOutcome {
    /// The URL was already dispatched earlier in the run; no new information
    AlreadySeen,
    /// Transport failure (DNS, connect, TLS, timeout); not counted, not
    /// retried
    NoResult,
    /// A response arrived and was classified
    Completed(ClassifiedResponse),
}

/// Fires probes, enforcing the global at-most-once filter
pub struct RequestExecutor {
    client: Client,
    seen: Mutex<HashSet<String>>,
    excluded: HashSet<u16>,
    counters: Arc<RunCounters>,
}

impl RequestExecutor {
    pub fn new(client: Client, excluded: HashSet<u16>, counters: Arc<RunCounters>) -> Self {
        Self {
            client,
            seen: Mutex::new(HashSet::new()),
            excluded,
            counters,
        }
    }

    /// Probes a URL at most once per run.
    ///
    /// The body is read only far enough to fingerprint it, and only for 200
    /// responses; everything else is classified on status alone. A hit
    /// increments the run's hit counter.
    pub async fn execute(&self, url: &Url) -> RequestOutcome {
        if !self.seen.lock().unwrap().insert(url.as_str().to_string()) {
            return RequestOutcome::AlreadySeen;
        }

        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::trace!("Request {} failed: {}", url, e);
                return RequestOutcome::NoResult;
            }
        };

        let status = response.status().as_u16();
        let fingerprint = if status == 200 {
            Some(fingerprint_response(response).await)
        } else {
            None
        };

        let hit = !self.excluded.contains(&status);
        if hit {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            "Probe {} -> {} (hit: {}, fingerprint: {})",
            url,
            status,
            hit,
            fingerprint
                .as_ref()
                .map(|f| f.to_string())
                .unwrap_or_default()
        );

        RequestOutcome::Completed(ClassifiedResponse {
            status,
            fingerprint,
            hit,
        })
    }

    /// Number of distinct URLs dispatched so far
    pub fn dispatched(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(50).is_ok());
    }

    #[tokio::test]
    async fn test_second_probe_of_same_url_is_skipped() {
        // The URL points nowhere routable; the first call consumes the seen
        // slot via a transport error, the second never reaches the network.
        let counters = Arc::new(RunCounters::default());
        let executor = RequestExecutor::new(
            build_http_client(1).unwrap(),
            HashSet::new(),
            Arc::clone(&counters),
        );

        let url = Url::parse("http://127.0.0.1:1/never").unwrap();
        assert!(matches!(
            executor.execute(&url).await,
            RequestOutcome::NoResult
        ));
        assert!(matches!(
            executor.execute(&url).await,
            RequestOutcome::AlreadySeen
        ));
        assert_eq!(executor.dispatched(), 1);
        assert_eq!(counters.hits.load(Ordering::Relaxed), 0);
    }
}
