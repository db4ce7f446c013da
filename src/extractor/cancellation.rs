//! Cooperative cancellation
//!
//! Cancellation is a single boolean flag settable from any thread at
//! any time. The worker polls it at sub-item granularity; cancellation
//! is cooperative, never preemptive, and best-effort with respect to
//! work already committed to the aggregator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for one extraction run
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, un-cancelled token
    pub fn new() -> Self {
        CancellationToken::default()
    }

    /// Request cancellation; safe from any thread
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
