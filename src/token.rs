//! Per-checkout supersession flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Token handed out with each checkout.
///
/// Flips once the same handle is re-submitted while the checkout is live,
/// telling the worker that a newer request for this work exists. Workers
/// may poll it to abandon a stale run early; the deferred re-queue on
/// completion happens either way, so ignoring the token is always safe.
#[derive(Debug, Clone)]
pub struct RunToken {
    superseded: Arc<AtomicBool>,
}

impl RunToken {
    pub(crate) fn new() -> Self {
        Self { superseded: Arc::new(AtomicBool::new(false)) }
    }

    /// Check whether this checkout has been superseded by a re-submission.
    pub fn is_superseded(&self) -> bool {
        self.superseded.load(Ordering::Acquire)
    }

    pub(crate) fn supersede(&self) {
        self.superseded.store(true, Ordering::Release);
    }
}
