//! Fuzz target for queue operation sequences.
//!
//! Drives arbitrary insert/get/done/cancel interleavings against the queue
//! and checks the checkout invariants hold at every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use taskq::{WorkItem, WorkQueue, WorkQueueConfig};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { key: u8, priority: i8 },
    Get,
    Done { index: u8 },
    Len,
    Cancel,
}

#[derive(Debug)]
struct Task {
    key: u8,
    priority: i8,
}

impl WorkItem for Task {
    type Handle = u8;

    fn handle(&self) -> u8 {
        self.key
    }

    fn priority(&self) -> i64 {
        self.priority as i64
    }
}

fuzz_target!(|input: (bool, Vec<Op>)| {
    let (drain_on_cancel, ops) = input;
    let queue: WorkQueue<Task> = WorkQueue::new(WorkQueueConfig { drain_on_cancel });

    let mut checked_out: Vec<Task> = Vec::new();
    let mut cancelled = false;

    for op in ops {
        match op {
            Op::Insert { key, priority } => {
                queue.insert(Task { key, priority });
            }
            Op::Get => {
                // Single-threaded driver: only call when get() cannot block.
                if queue.len() > 0 || cancelled {
                    if let Some((task, _token)) = queue.get() {
                        // The same handle must never be checked out twice.
                        assert!(checked_out.iter().all(|t| t.key != task.key));
                        checked_out.push(task);
                    }
                }
            }
            Op::Done { index } => {
                if !checked_out.is_empty() {
                    let task = checked_out.remove(index as usize % checked_out.len());
                    queue.done(task);
                }
            }
            Op::Len => {
                let _ = queue.len();
            }
            Op::Cancel => {
                queue.cancel();
                cancelled = true;
            }
        }
    }
});
