//! Structural cycle detection
//!
//! Some targets serve identical content recursively deeper into a tree
//! (`/x`, `/x/x`, `/x/x/x`, ...). The loop guard records which request paths
//! produced which fingerprints and vetoes recursion whenever the same
//! content reappears along an ancestor/descendant path, stopping the spiral
//! immediately instead of waiting for error tolerance or queue limits.

use crate::scanner::fingerprint::Fingerprint;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Ancestry table: fingerprint to the set of normalized request paths that
/// produced it. Grows monotonically for the lifetime of the run.
#[derive(Default)]
pub struct LoopGuard {
    ancestors: Mutex<HashMap<Fingerprint, HashSet<String>>>,
}

impl LoopGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `path` produced `fingerprint`.
    ///
    /// Called for every 200 hit, even when its recursion is ultimately not
    /// taken, so later siblings can detect cycles against it.
    pub fn record(&self, fingerprint: &Fingerprint, path: &str) {
        self.ancestors
            .lock()
            .unwrap()
            .entry(fingerprint.clone())
            .or_default()
            .insert(path.to_string());
    }

    /// Checks whether recursing at `path` would revisit content already seen
    /// along its ancestor chain or in its subtree.
    ///
    /// The comparison is true path hierarchy, not substring: both sides are
    /// terminated with `/` so `/a/b` relates to `/a/b/c` but not to `/a/bb`.
    pub fn creates_cycle(&self, fingerprint: &Fingerprint, path: &str) -> bool {
        let ancestors = self.ancestors.lock().unwrap();
        let Some(paths) = ancestors.get(fingerprint) else {
            return false;
        };

        let current = format!("{}/", path.trim_end_matches('/'));
        for known in paths {
            let known = format!("{}/", known.trim_end_matches('/'));
            if known == current {
                continue;
            }
            if current.starts_with(&known) || known.starts_with(&current) {
                return true;
            }
        }
        false
    }
}
