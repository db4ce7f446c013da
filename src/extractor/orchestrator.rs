//! Extraction run driver
//!
//! The orchestrator owns one run: it selects the traversal mode,
//! sizes the item budget, drives the strategy, and maps the terminal
//! condition onto the outcome/error surface. Entries are processed
//! strictly sequentially in source enumeration order on the calling
//! worker; the detached runner moves the whole run onto its own
//! thread and reports through a channel.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{error, info};

use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::catalog::mode::{select_mode, CatalogMode};
use crate::catalog::source::{open_container, RenditionSource};
use crate::extractor::aggregator::ResultAggregator;
use crate::extractor::cancellation::CancellationToken;
use crate::extractor::config::RunConfiguration;
use crate::extractor::events::{ChannelObserver, ExtractionEvent, ExtractionOutcome, ProgressObserver};
use crate::extractor::state::RunState;
use crate::extractor::traversal::TraversalStrategyFactory;

/// Phase of an extraction run's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Run not started yet
    NotStarted,
    /// Opening the container
    Opening,
    /// Walking the enumeration surface
    Traversing,
    /// Run finished with at least one descriptor
    Completed,
    /// Run cut short by cooperative cancellation
    Cancelled,
    /// Run ended in a fatal error
    Failed,
    /// Container rejected before traversal (restricted format)
    Rejected,
}

/// Driver for one extraction run
pub struct ExtractionOrchestrator {
    /// Immutable configuration for this run
    config: RunConfiguration,
    /// Cancellation flag shared with the caller
    token: CancellationToken,
    /// Current phase of the run
    phase: RunPhase,
}

impl ExtractionOrchestrator {
    /// Create an orchestrator for one run
    ///
    /// # Arguments
    /// * `config` - Run configuration, immutable for the run
    pub fn new(config: RunConfiguration) -> Self {
        ExtractionOrchestrator {
            config,
            token: CancellationToken::new(),
            phase: RunPhase::NotStarted,
        }
    }

    /// Token callers hold to request cooperative cancellation
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Current phase of the run
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Open a container path and run the extraction over it
    ///
    /// # Arguments
    /// * `path` - Container path supplied by the caller
    /// * `observer` - Progress consumer
    ///
    /// # Returns
    /// The outcome, or a fatal error
    pub fn run_container(&mut self, path: &str,
                         observer: &dyn ProgressObserver) -> CatalogResult<ExtractionOutcome> {
        self.phase = RunPhase::Opening;
        info!("Opening container {}", path);

        let source = match open_container(path) {
            Ok(source) => source,
            Err(e) => {
                self.phase = match e {
                    CatalogError::UnsupportedRestrictedFormat => RunPhase::Rejected,
                    _ => RunPhase::Failed,
                };
                error!("Failed to open container {}: {}", path, e);
                return Err(e);
            }
        };

        self.run(source.as_ref(), observer)
    }

    /// Run the extraction over an already-opened source
    ///
    /// # Arguments
    /// * `source` - Opened rendition source
    /// * `observer` - Progress consumer
    ///
    /// # Returns
    /// The outcome, or a fatal error
    pub fn run(&mut self, source: &dyn RenditionSource,
               observer: &dyn ProgressObserver) -> CatalogResult<ExtractionOutcome> {
        let mode = select_mode(source, self.config.mode_override);
        self.phase = RunPhase::Traversing;

        let entry_count = match mode {
            CatalogMode::FlatCatalog => source.image_names().len(),
            CatalogMode::ThemeStore => source.rendition_keys().len(),
        };
        let total = self.config.effective_total(entry_count);
        info!("Starting traversal: {} entries enumerated, item budget {}", entry_count, total);

        let mut state = RunState::new(total, self.token.clone());
        let mut aggregator = ResultAggregator::new();

        // An empty enumeration (or a zero budget) never reports
        // progress and terminates as NoAssetsProduced below
        if total > 0 {
            let mut strategy = TraversalStrategyFactory::create_strategy(mode);
            if let Err(e) = strategy.traverse(
                source, &self.config, &mut state, &mut aggregator, observer) {
                self.phase = RunPhase::Failed;
                error!("Traversal failed: {}", e);
                return Err(e);
            }
        }

        if self.token.is_cancelled() {
            self.phase = RunPhase::Cancelled;
            info!("Run cancelled after {} descriptors", aggregator.len());
            return Ok(ExtractionOutcome {
                descriptors: aggregator.into_descriptors(),
                cancelled: true,
            });
        }

        if aggregator.is_empty() {
            self.phase = RunPhase::Failed;
            return Err(CatalogError::NoAssetsProduced);
        }

        self.phase = RunPhase::Completed;
        info!("Run completed with {} descriptors, {} of {} items loaded",
              aggregator.len(), state.loaded_count(), state.total_count());
        Ok(ExtractionOutcome {
            descriptors: aggregator.into_descriptors(),
            cancelled: false,
        })
    }
}

/// Run an extraction on a dedicated worker thread
///
/// Progress and the single completion event are delivered over the
/// returned channel, decoupling the worker from the notification
/// consumer so a slow consumer never blocks extraction.
///
/// # Arguments
/// * `source` - Opened rendition source, moved onto the worker
/// * `config` - Run configuration
///
/// # Returns
/// The run's cancellation token and the event receiver
pub fn run_detached(source: Box<dyn RenditionSource + Send>,
                    config: RunConfiguration)
                    -> (CancellationToken, Receiver<ExtractionEvent>) {
    let (sender, receiver) = mpsc::channel();
    let mut orchestrator = ExtractionOrchestrator::new(config);
    let token = orchestrator.cancellation_token();

    let completion_sender = sender.clone();
    thread::spawn(move || {
        let observer = ChannelObserver::new(sender);
        let result = orchestrator.run(source.as_ref(), &observer);
        // The terminal event fires exactly once, for every outcome
        let _ = completion_sender.send(ExtractionEvent::Completed(result));
    });

    (token, receiver)
}
