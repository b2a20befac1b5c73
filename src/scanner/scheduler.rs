//! Bounded job queue and run accounting
//!
//! Workers share one bounded queue. Recursion batches that do not fit in the
//! free capacity are dropped whole and counted, never partially enqueued and
//! never blocked on; this is the lossy backpressure contract that keeps
//! memory bounded against combinatorial fan-out.

use crate::scanner::task::ScanTask;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// Atomically updated counters shared by workers and the progress reporter
#[derive(Debug, Default)]
pub struct RunCounters {
    /// Tasks fully processed
    pub completed: AtomicU64,
    /// Tasks created (grows as recursion expands)
    pub total: AtomicU64,
    /// Non-excluded responses
    pub hits: AtomicU64,
    /// Tasks discarded by the backpressure policy
    pub dropped: AtomicU64,
}

/// Bounded multi-producer multi-consumer task queue with completion
/// detection.
///
/// The semaphore counts queued items; [`JobQueue::pop`] blocks on it, so an
/// idle worker suspends without polling. A separate pending count tracks
/// enqueued-but-unfinished tasks; when it reaches zero the semaphore is
/// closed and every blocked `pop` returns `None`, draining the pool.
pub struct JobQueue {
    queue: Mutex<VecDeque<ScanTask>>,
    items: Semaphore,
    capacity: usize,
    pending: AtomicUsize,
}

impl JobQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            items: Semaphore::new(0),
            capacity,
            pending: AtomicUsize::new(0),
        }
    }

    /// Enqueues the initial task set.
    ///
    /// Seeding is exempt from the drop policy: workers are already draining
    /// the queue, and a capacity check here would spuriously discard large
    /// wordlists at depth zero.
    pub fn seed(&self, tasks: Vec<ScanTask>) {
        let count = tasks.len();
        if count == 0 {
            return;
        }
        self.pending.fetch_add(count, Ordering::AcqRel);
        self.queue.lock().unwrap().extend(tasks);
        self.items.add_permits(count);
    }

    /// Enqueues a recursion batch, all-or-nothing.
    ///
    /// Returns `false` without enqueueing anything when the free capacity is
    /// smaller than the batch; the caller counts the batch as dropped.
    pub fn push_batch(&self, tasks: Vec<ScanTask>) -> bool {
        let count = tasks.len();
        if count == 0 {
            return true;
        }
        {
            let mut queue = self.queue.lock().unwrap();
            if self.capacity.saturating_sub(queue.len()) < count {
                return false;
            }
            self.pending.fetch_add(count, Ordering::AcqRel);
            queue.extend(tasks);
        }
        self.items.add_permits(count);
        true
    }

    /// Takes the next task, suspending while the queue is empty but work is
    /// still pending. Returns `None` once the run has quiesced.
    pub async fn pop(&self) -> Option<ScanTask> {
        match self.items.acquire().await {
            Ok(permit) => {
                permit.forget();
                self.queue.lock().unwrap().pop_front()
            }
            // Closed: pending hit zero, nothing left to do
            Err(_) => None,
        }
    }

    /// Marks one previously-popped task as fully processed, including any
    /// children it enqueued. The last completion closes the queue.
    pub fn task_done(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.items.close();
        }
    }

    /// Tasks enqueued but not yet completed
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Tasks currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(word: &str) -> ScanTask {
        ScanTask::seed(word.to_string())
    }

    #[tokio::test]
    async fn test_pop_returns_seeded_tasks_in_order() {
        let queue = JobQueue::new(10);
        queue.seed(vec![task("a"), task("b")]);

        assert_eq!(queue.pop().await.unwrap().word, "a");
        assert_eq!(queue.pop().await.unwrap().word, "b");
        assert_eq!(queue.queued(), 0);
        assert_eq!(queue.pending(), 2);
    }

    #[tokio::test]
    async fn test_push_batch_rejects_oversized_batch_whole() {
        let queue = JobQueue::new(3);
        queue.seed(vec![task("a"), task("b")]);

        // Free capacity is 1; a batch of 2 must be rejected without a
        // partial enqueue.
        assert!(!queue.push_batch(vec![task("c"), task("d")]));
        assert_eq!(queue.queued(), 2);
        assert_eq!(queue.pending(), 2);

        assert!(queue.push_batch(vec![task("e")]));
        assert_eq!(queue.queued(), 3);
    }

    #[tokio::test]
    async fn test_queue_closes_when_all_tasks_done() {
        let queue = JobQueue::new(10);
        queue.seed(vec![task("a")]);

        let popped = queue.pop().await;
        assert!(popped.is_some());
        queue.task_done();

        assert_eq!(queue.pending(), 0);
        assert!(queue.pop().await.is_none());
    }

    #[tokio::test]
    async fn test_children_keep_queue_open() {
        let queue = JobQueue::new(10);
        queue.seed(vec![task("a")]);

        let _parent = queue.pop().await.unwrap();
        assert!(queue.push_batch(vec![task("child")]));
        queue.task_done();

        // The child is still pending, so the queue must stay open.
        let child = queue.pop().await;
        assert_eq!(child.unwrap().word, "child");
        queue.task_done();
        assert!(queue.pop().await.is_none());
    }

    #[tokio::test]
    async fn test_blocked_pop_wakes_on_close() {
        let queue = std::sync::Arc::new(JobQueue::new(10));
        queue.seed(vec![task("a")]);

        // Take the only task, then block a second consumer on the empty
        // queue while work is still pending.
        let first = queue.pop().await;
        assert!(first.is_some());

        let waiter = {
            let queue = std::sync::Arc::clone(&queue);
            tokio::spawn(async move { queue.pop().await })
        };

        // Completing the last task must wake the blocked pop with None
        // instead of leaving it hanging.
        queue.task_done();
        assert!(waiter.await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_is_accepted() {
        let queue = JobQueue::new(1);
        assert!(queue.push_batch(Vec::new()));
        assert_eq!(queue.pending(), 0);
    }
}
