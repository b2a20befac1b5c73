//! Reflective-endpoint prechecking
//!
//! Before the scanner commits to recursing into a directory level, that
//! level is probed with improbable nonce words. A handler that answers
//! structurally different paths with identical status and content is a
//! catch-all (an SPA fallback, a 200-ing error page); recursing into it
//! would produce unbounded false positives, so the whole branch is vetoed.

use crate::scanner::fingerprint::{fingerprint_response, Fingerprint};
use crate::url::build_probe_url;
use reqwest::Client;
use url::Url;

/// Nonce words no real application is expected to route
const NONCE_WORDS: [&str; 3] = ["pqx7verify31", "zk9probe824w", "qm3check57yz"];

/// Verdict for one directory level
#[derive(Debug, Clone)]
pub enum PrecheckVerdict {
    /// Responses diverged (or everything 404'd); the level behaves normally
    Clean,
    /// Every nonce drew the same response; recursion into this branch is
    /// vetoed
    Reflective {
        status: u16,
        fingerprint: Option<Fingerprint>,
    },
}

/// Probes directory levels for catch-all behavior
pub struct Prechecker {
    client: Client,
}

impl Prechecker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Probes one directory level with the nonce words.
    ///
    /// Nonce requests bypass the seen set; they are diagnostics, not probes.
    /// For each response that arrives, (status, fingerprint) is recorded,
    /// with the fingerprint computed for any non-404 status. Fewer than two
    /// recorded results, or a plain-404 baseline, mean the level is clean.
    pub async fn probe(&self, base: &Url, prefix: &str) -> PrecheckVerdict {
        let mut samples: Vec<(u16, Option<Fingerprint>)> = Vec::with_capacity(NONCE_WORDS.len());

        for word in NONCE_WORDS {
            let url = match build_probe_url(base, prefix, word, false) {
                Ok(u) => u,
                Err(_) => continue,
            };
            let response = match self.client.get(url).send().await {
                Ok(r) => r,
                Err(_) => continue,
            };

            let status = response.status().as_u16();
            let fingerprint = if status != 404 {
                Some(fingerprint_response(response).await)
            } else {
                None
            };
            samples.push((status, fingerprint));
        }

        if samples.len() < 2 {
            return PrecheckVerdict::Clean;
        }

        let (first_status, first_fingerprint) = &samples[0];
        // A 404 baseline is the normal answer for paths that do not exist
        if *first_status == 404 {
            return PrecheckVerdict::Clean;
        }

        let all_same = samples[1..]
            .iter()
            .all(|(status, fingerprint)| status == first_status && fingerprint == first_fingerprint);

        if all_same {
            PrecheckVerdict::Reflective {
                status: *first_status,
                fingerprint: first_fingerprint.clone(),
            }
        } else {
            PrecheckVerdict::Clean
        }
    }
}
