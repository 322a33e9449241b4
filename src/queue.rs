//! The work queue coordinator.
//!
//! One mutex guards the three bookkeeping structures (ordered store,
//! waiting set, in-progress set); one condvar blocks workers in
//! [`WorkQueue::get`] until work arrives or the queue is cancelled.
//! Producers never block beyond the lock.

use std::collections::HashMap;

use parking_lot::{Condvar, Mutex};

use crate::item::WorkItem;
use crate::priority::PriorityQueue;
use crate::set::HandleSet;
use crate::token::RunToken;

/// Configuration for a work queue, fixed at construction.
#[derive(Debug, Clone)]
pub struct WorkQueueConfig {
    /// When true, a cancelled queue keeps dispatching already-queued items
    /// until the store is empty; when false, dispatch stops immediately and
    /// queued items are stranded.
    pub drain_on_cancel: bool,
}

impl Default for WorkQueueConfig {
    fn default() -> Self {
        Self { drain_on_cancel: false }
    }
}

struct Inner<T: WorkItem> {
    items: PriorityQueue<T>,
    waiting: HandleSet<T::Handle>,
    in_progress: HandleSet<T::Handle>,
    /// Supersession tokens for live checkouts, keyed by handle.
    checkouts: HashMap<T::Handle, RunToken>,
    cancelled: bool,
}

/// Concurrent, priority-ordered work queue with handle deduplication.
///
/// Producers [`insert`](WorkQueue::insert) items; workers
/// [`get`](WorkQueue::get) them one at a time and report back with
/// [`done`](WorkQueue::done). The highest-priority queued item is always
/// served next. Re-submitting a handle that is already queued is a no-op;
/// re-submitting a handle that is currently checked out defers one more
/// cycle until the current run completes, so the same handle is never
/// processed by two workers at once.
///
/// # Example
///
/// ```
/// use taskq::{WorkItem, WorkQueue, WorkQueueConfig};
///
/// struct Task {
///     name: &'static str,
///     urgency: i64,
/// }
///
/// impl WorkItem for Task {
///     type Handle = &'static str;
///
///     fn handle(&self) -> &'static str {
///         self.name
///     }
///
///     fn priority(&self) -> i64 {
///         self.urgency
///     }
/// }
///
/// let queue = WorkQueue::new(WorkQueueConfig::default());
/// queue.insert(Task { name: "compact", urgency: 1 });
/// queue.insert(Task { name: "flush", urgency: 5 });
///
/// let (task, _token) = queue.get().unwrap();
/// assert_eq!(task.name, "flush");
/// queue.done(task);
/// ```
pub struct WorkQueue<T: WorkItem> {
    inner: Mutex<Inner<T>>,
    /// Signalled once per newly queued item, broadcast on cancel.
    available: Condvar,
    drain_on_cancel: bool,
}

impl<T: WorkItem> WorkQueue<T> {
    pub fn new(config: WorkQueueConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: PriorityQueue::new(),
                waiting: HandleSet::new(),
                in_progress: HandleSet::new(),
                checkouts: HashMap::new(),
                cancelled: false,
            }),
            available: Condvar::new(),
            drain_on_cancel: config.drain_on_cancel,
        }
    }

    /// Submit an item for processing.
    ///
    /// Takes ownership of the item. The submission is dropped without
    /// effect when the queue is cancelled, or when the handle already has a
    /// queued entry; in that case the queued entry keeps its original
    /// priority even if this submission's differs. If the handle is
    /// currently checked out, the desire to re-process is recorded and the
    /// live checkout's [`RunToken`] flips; [`done`](WorkQueue::done) will
    /// re-queue the work for another cycle.
    ///
    /// Never blocks beyond the internal lock.
    pub fn insert(&self, item: T) {
        let mut inner = self.inner.lock();

        if inner.cancelled {
            // No new work is admitted once shutdown begins.
            tracing::trace!("insert after cancel dropped");
            return;
        }

        let handle = item.handle();

        if inner.waiting.has(&handle) {
            // One queue slot per handle.
            return;
        }

        inner.waiting.insert(handle.clone());

        if inner.in_progress.has(&handle) {
            // Re-submitted mid-run: the desire is recorded in the waiting
            // set and materialized by done(). Flag the live checkout so the
            // worker can notice its run is stale.
            if let Some(token) = inner.checkouts.get(&handle) {
                token.supersede();
            }
            return;
        }

        inner.items.push(item);
        self.available.notify_one();
    }

    /// Check out the highest-priority item.
    ///
    /// Blocks while the queue is empty and not cancelled. Returns the item
    /// together with its [`RunToken`], or `None` once the queue is
    /// cancelled: immediately if the queue was built without
    /// `drain_on_cancel`, otherwise only after the remaining queued items
    /// have been dispatched. `None` means no more work will ever come.
    pub fn get(&self) -> Option<(T, RunToken)> {
        let mut inner = self.inner.lock();

        while inner.items.is_empty() && !inner.cancelled {
            self.available.wait(&mut inner);
        }

        if inner.cancelled && (!self.drain_on_cancel || inner.items.is_empty()) {
            return None;
        }

        let item = inner.items.pop()?;
        let handle = item.handle();

        // Move the handle from waiting to in-progress and register the
        // checkout's supersession token.
        inner.waiting.delete(&handle);
        inner.in_progress.insert(handle.clone());
        let token = RunToken::new();
        inner.checkouts.insert(handle, token.clone());

        Some((item, token))
    }

    /// Report completion of a checkout.
    ///
    /// Must be called exactly once per successful [`get`](WorkQueue::get),
    /// after processing finishes (success or failure alike). If the handle
    /// was re-submitted while checked out, the item is re-queued and a
    /// waiter is woken; otherwise the work is fully retired and the item
    /// dropped. Calling this for an item that was never checked out is a
    /// caller bug with undefined queueing effects.
    pub fn done(&self, item: T) {
        let mut inner = self.inner.lock();

        let handle = item.handle();
        inner.in_progress.delete(&handle);
        inner.checkouts.remove(&handle);

        if inner.waiting.has(&handle) {
            // Re-submitted while running: back into the store for another
            // cycle. The handle stays in the waiting set until that entry
            // is itself checked out.
            inner.items.push(item);
            self.available.notify_one();
        }
    }

    /// Number of queued (not checked-out) items. Advisory: may be stale the
    /// instant it returns.
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Whether no items are queued. Advisory, like [`len`](WorkQueue::len).
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Cancel the queue. Idempotent, and never undone.
    ///
    /// Stops admission immediately and wakes every blocked
    /// [`get`](WorkQueue::get) caller. Whether already-queued items are
    /// still dispatched is fixed by `drain_on_cancel` at construction.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock();

        if inner.cancelled {
            return;
        }
        inner.cancelled = true;

        tracing::debug!("work queue cancelled; waking all waiters");
        self.available.notify_all();
    }

    /// Whether the queue has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.lock().cancelled
    }
}

impl<T: WorkItem> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new(WorkQueueConfig::default())
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
