//! Adaptive recursive scan engine
//!
//! The scanner seeds one task per wordlist entry at the scan root, runs them
//! through a fixed worker pool, and expands hits per-branch under the
//! error-tolerance budget. Duplicate content, structural loops, and
//! reflective catch-all branches are suppressed; recursion batches that
//! would overflow the bounded queue are dropped and counted.

mod controller;
mod executor;
mod fingerprint;
mod ledger;
mod loop_guard;
mod precheck;
mod scheduler;
mod task;

pub use controller::{RecursionController, TaskVerdict};
pub use executor::{build_http_client, ClassifiedResponse, RequestExecutor, RequestOutcome};
pub use fingerprint::{Fingerprint, FINGERPRINT_CAP};
pub use ledger::DedupLedger;
pub use loop_guard::LoopGuard;
pub use precheck::{PrecheckVerdict, Prechecker};
pub use scheduler::{JobQueue, RunCounters};
pub use task::ScanTask;

use crate::config::ScanConfig;
use crate::url::build_probe_url;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Final accounting for a completed scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Surviving canonical URLs, deduplicated and sorted
    pub urls: Vec<String>,
    /// Non-excluded responses observed
    pub hits: u64,
    /// Tasks discarded by backpressure
    pub dropped: u64,
    /// Tasks fully processed
    pub completed: u64,
    /// Tasks created over the whole run
    pub total: u64,
    /// The scan root itself answered every nonce identically; nothing was
    /// probed
    pub root_reflective: bool,
}

/// Shared state for one scan run
struct ScanContext {
    config: ScanConfig,
    words: Arc<Vec<String>>,
    executor: RequestExecutor,
    prechecker: Prechecker,
    controller: RecursionController,
    queue: JobQueue,
    counters: Arc<RunCounters>,
}

impl ScanContext {
    /// Runs one task end-to-end: build, probe, classify, decide, and
    /// optionally enqueue the next level.
    async fn process_task(&self, task: ScanTask) {
        let url = match build_probe_url(
            &self.config.base_url,
            &task.prefix,
            &task.word,
            task.trailing_slash,
        ) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Skipping unbuildable probe {:?}: {}", task.word, e);
                return;
            }
        };

        let response = match self.executor.execute(&url).await {
            RequestOutcome::Completed(r) => r,
            RequestOutcome::AlreadySeen | RequestOutcome::NoResult => return,
        };

        match self.controller.decide(&task, &url, &response) {
            TaskVerdict::Excluded | TaskVerdict::HitAbsorbed => {}
            TaskVerdict::HitTerminal => {
                // Terminal 200s still belong in the result set
                self.controller.record_hit(&url, &response);
            }
            TaskVerdict::HitContinuing {
                next_prefix,
                error_budget,
            } => {
                self.recurse(&task, &next_prefix, error_budget).await;
            }
        }
    }

    /// Prechecks the next directory level and enqueues one child per word.
    ///
    /// The whole batch is dropped when the queue cannot take it; partial
    /// enqueues would skew branch coverage unpredictably.
    async fn recurse(&self, task: &ScanTask, next_prefix: &str, error_budget: u32) {
        match self
            .prechecker
            .probe(&self.config.base_url, next_prefix)
            .await
        {
            PrecheckVerdict::Reflective {
                status,
                fingerprint,
            } => {
                tracing::warn!(
                    "Reflective endpoint at '{}': every probe answers status {} (fingerprint: {}); skipping branch",
                    if next_prefix.is_empty() { "root" } else { next_prefix },
                    status,
                    fingerprint.map(|f| f.to_string()).unwrap_or_default()
                );
            }
            PrecheckVerdict::Clean => {
                let children: Vec<ScanTask> = self
                    .words
                    .iter()
                    .map(|word| task.child(next_prefix, word.clone(), error_budget))
                    .collect();
                let count = children.len() as u64;

                if self.queue.push_batch(children) {
                    self.counters.total.fetch_add(count, Ordering::Relaxed);
                } else {
                    self.counters.dropped.fetch_add(count, Ordering::Relaxed);
                    tracing::debug!(
                        "Dropped recursion into '{}': queue at {}/{} tasks",
                        next_prefix,
                        self.queue.queued(),
                        self.config.queue_capacity
                    );
                }
            }
        }
    }
}

/// Runs a complete scan to quiescence and reports the surviving URLs.
///
/// The scan root is prechecked for reflective behavior before any probe is
/// issued; a reflective root aborts the run with an empty result set rather
/// than flooding the output with false positives.
pub async fn scan(config: &ScanConfig, words: &[String]) -> Result<ScanReport> {
    if words.is_empty() {
        return Err(crate::PathsiftError::Wordlist(
            "cannot scan with an empty wordlist".to_string(),
        ));
    }

    let client = build_http_client(config.concurrency)?;
    let counters = Arc::new(RunCounters::default());

    let ctx = Arc::new(ScanContext {
        config: config.clone(),
        words: Arc::new(words.to_vec()),
        executor: RequestExecutor::new(
            client.clone(),
            config.excluded_statuses.clone(),
            Arc::clone(&counters),
        ),
        prechecker: Prechecker::new(client),
        controller: RecursionController::new(config),
        queue: JobQueue::new(config.queue_capacity),
        counters: Arc::clone(&counters),
    });

    if let PrecheckVerdict::Reflective {
        status,
        fingerprint,
    } = ctx.prechecker.probe(&config.base_url, "").await
    {
        tracing::warn!(
            "Target answers every path identically (status {}, fingerprint: {}); aborting scan",
            status,
            fingerprint.map(|f| f.to_string()).unwrap_or_default()
        );
        return Ok(ScanReport {
            urls: Vec::new(),
            hits: 0,
            dropped: 0,
            completed: 0,
            total: 0,
            root_reflective: true,
        });
    }

    let seeds: Vec<ScanTask> = words.iter().cloned().map(ScanTask::seed).collect();
    counters.total.store(seeds.len() as u64, Ordering::Relaxed);
    ctx.queue.seed(seeds);

    let (progress, progress_bar) = spawn_progress_reporter(Arc::clone(&counters));

    let mut workers = Vec::with_capacity(config.concurrency);
    for _ in 0..config.concurrency {
        let ctx = Arc::clone(&ctx);
        workers.push(tokio::spawn(async move {
            while let Some(task) = ctx.queue.pop().await {
                ctx.process_task(task).await;
                ctx.counters.completed.fetch_add(1, Ordering::Relaxed);
                ctx.queue.task_done();
            }
        }));
    }

    for worker in workers {
        if let Err(e) = worker.await {
            tracing::error!("Scan worker failed: {}", e);
        }
    }
    progress.abort();
    progress_bar.finish_and_clear();

    Ok(ScanReport {
        urls: ctx.controller.surviving_urls(),
        hits: counters.hits.load(Ordering::Relaxed),
        dropped: counters.dropped.load(Ordering::Relaxed),
        completed: counters.completed.load(Ordering::Relaxed),
        total: counters.total.load(Ordering::Relaxed),
        root_reflective: false,
    })
}

/// Renders a progress bar on stderr from the run counters every 100 ms.
///
/// Hidden automatically when stderr is not a terminal, so test and piped
/// runs stay quiet.
fn spawn_progress_reporter(
    counters: Arc<RunCounters>,
) -> (tokio::task::JoinHandle<()>, ProgressBar) {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }

    let ticker_bar = bar.clone();
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(100));
        loop {
            ticker.tick().await;
            let total = counters.total.load(Ordering::Relaxed);
            let completed = counters.completed.load(Ordering::Relaxed);
            let hits = counters.hits.load(Ordering::Relaxed);
            ticker_bar.set_length(total);
            ticker_bar.set_position(completed.min(total));
            ticker_bar.set_message(format!("hits: {}", hits));
        }
    });
    (handle, bar)
}
