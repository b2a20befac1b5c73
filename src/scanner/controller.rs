//! Recursion control
//!
//! Decides, per completed task, whether the branch keeps expanding and with
//! what error budget. Only status-200 responses reset the budget and consult
//! the dedup ledger and loop guard; other hits burn budget until the
//! tolerance is reached.

use crate::config::ScanConfig;
use crate::scanner::executor::ClassifiedResponse;
use crate::scanner::ledger::DedupLedger;
use crate::scanner::loop_guard::LoopGuard;
use crate::scanner::task::ScanTask;
use crate::url::{branch_of, join_prefix, normalize_output};
use url::Url;

/// Resolution of a completed task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskVerdict {
    /// Status in the exclusion set: not a hit, never recursed
    Excluded,
    /// Counted as a hit; no recursion (budget exhausted, recursion disabled,
    /// or a trailing-slash leaf)
    HitTerminal,
    /// Counted as a hit; lost the dedup race or tripped the loop guard
    HitAbsorbed,
    /// Counted as a hit; spawns one child per wordlist entry at the next
    /// level
    HitContinuing {
        next_prefix: String,
        error_budget: u32,
    },
}

/// Applies the error-tolerance state machine plus the dedup and loop-guard
/// gates
pub struct RecursionController {
    tolerance: u32,
    recursive: bool,
    base_path: String,
    ledger: DedupLedger,
    loop_guard: LoopGuard,
}

impl RecursionController {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            tolerance: config.error_tolerance,
            recursive: config.recursive,
            base_path: config.base_url.path().to_string(),
            ledger: DedupLedger::new(),
            loop_guard: LoopGuard::new(),
        }
    }

    /// Resolves a completed task into a verdict.
    ///
    /// 200 content is recorded in the ancestry table unconditionally, before
    /// any gate, so siblings that never recurse still contribute to cycle
    /// detection.
    pub fn decide(&self, task: &ScanTask, url: &Url, response: &ClassifiedResponse) -> TaskVerdict {
        if !response.hit {
            return TaskVerdict::Excluded;
        }

        let path = url.path();
        if response.status == 200 {
            if let Some(fingerprint) = &response.fingerprint {
                self.loop_guard.record(fingerprint, path);
            }
        }

        let error_budget = if response.status == 200 {
            0
        } else {
            task.error_budget + 1
        };

        if task.trailing_slash || !self.recursive {
            return TaskVerdict::HitTerminal;
        }
        if error_budget >= self.tolerance {
            return TaskVerdict::HitTerminal;
        }

        if response.status == 200 {
            if let Some(fingerprint) = &response.fingerprint {
                let normalized = normalize_output(url);
                let branch = branch_of(url, &self.base_path);
                if !self.ledger.observe(&branch, fingerprint, &normalized) {
                    tracing::debug!("Duplicate content absorbed: {}", normalized);
                    return TaskVerdict::HitAbsorbed;
                }
                if self.loop_guard.creates_cycle(fingerprint, path) {
                    tracing::debug!("Content loop detected at {}", path);
                    return TaskVerdict::HitAbsorbed;
                }
            }
        }

        TaskVerdict::HitContinuing {
            next_prefix: join_prefix(&task.prefix, &task.word),
            error_budget,
        }
    }

    /// Records root-level and non-recursing 200 content in the ledger so the
    /// final result set includes hits from single-level scans as well.
    pub fn record_hit(&self, url: &Url, response: &ClassifiedResponse) {
        if response.status != 200 {
            return;
        }
        if let Some(fingerprint) = &response.fingerprint {
            let normalized = normalize_output(url);
            let branch = branch_of(url, &self.base_path);
            self.ledger.observe(&branch, fingerprint, &normalized);
        }
    }

    /// The surviving canonical result set
    pub fn surviving_urls(&self) -> Vec<String> {
        self.ledger.surviving_urls()
    }
}
