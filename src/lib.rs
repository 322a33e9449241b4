//! taskq: priority-ordered, deduplicating work queue.
//!
//! Coordinates producer threads submitting units of work against worker
//! threads that process them one at a time, providing three guarantees at
//! once:
//!
//! - **Ordering**: the highest-priority queued item is always served next.
//! - **Deduplication**: items carry a stable handle; re-submitting a handle
//!   that is already queued or already being processed never creates
//!   parallel duplicate processing. A re-submission during processing is
//!   deferred, not lost.
//! - **Shutdown**: cancellation is level-triggered and idempotent, and can
//!   optionally drain already-queued items before signalling completion.
//!
//! The queue is a pure in-memory coordination primitive. It does not know
//! what "processing" an item means: workers check items out with
//! [`WorkQueue::get`] and report back with [`WorkQueue::done`]. Retry
//! policy, timeouts, and worker pooling all belong to the caller.
//!
//! Internally the queue is a classic monitor: one mutex over the ordered
//! store and the two handle sets, one condvar for blocked workers. Only
//! [`WorkQueue::get`] ever suspends.

mod item;
mod priority;
mod queue;
mod set;
mod token;

pub use item::WorkItem;
pub use priority::PriorityQueue;
pub use queue::{WorkQueue, WorkQueueConfig};
pub use set::HandleSet;
pub use token::RunToken;
