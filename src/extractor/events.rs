//! Run outcome and caller-facing notification surface
//!
//! Progress and completion are decoupled from the worker: the
//! synchronous path takes a ProgressObserver and returns the outcome,
//! the detached path delivers both as events over a channel so a slow
//! consumer never blocks extraction.

use std::sync::mpsc::Sender;

use crate::catalog::descriptor::AssetDescriptor;
use crate::catalog::errors::CatalogError;

/// Terminal result of one extraction run
///
/// Cancellation is not an error: a cancelled run yields the
/// descriptors appended strictly before cancellation was observed.
pub struct ExtractionOutcome {
    /// Produced descriptors, in traversal order
    pub descriptors: Vec<AssetDescriptor>,
    /// Whether the run was cut short by cancellation
    pub cancelled: bool,
}

/// Incremental progress consumer for one run
///
/// `on_progress` is invoked zero or more times before completion with
/// a fraction in [0, 1]; no invocation happens after cancellation has
/// been observed.
pub trait ProgressObserver {
    /// Receive one progress fraction
    fn on_progress(&self, fraction: f64);
}

/// Observer that discards all progress signals
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&self, _fraction: f64) {}
}

/// Event delivered on the detached runner's channel
pub enum ExtractionEvent {
    /// Progress fraction in [0, 1]
    Progress(f64),
    /// The single terminal event of the run
    Completed(Result<ExtractionOutcome, CatalogError>),
}

/// Observer that forwards progress into an event channel
///
/// Send failures are ignored: a consumer that went away must not
/// abort the run.
pub struct ChannelObserver {
    sender: Sender<ExtractionEvent>,
}

impl ChannelObserver {
    /// Create an observer forwarding into the given sender
    pub fn new(sender: Sender<ExtractionEvent>) -> Self {
        ChannelObserver { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, fraction: f64) {
        let _ = self.sender.send(ExtractionEvent::Progress(fraction));
    }
}
