//! Asset extraction pipeline
//!
//! This module provides the run driver and the per-mode traversal
//! strategies that normalize both container enumeration models into
//! one uniform descriptor stream.

mod config;
mod cancellation;
mod state;
mod aggregator;
mod events;
mod classifier;
mod materialize;
mod traversal;
mod flat_strategy;
mod store_strategy;
mod orchestrator;
#[cfg(test)]
mod tests;

// Public exports
pub use config::{parse_mode, RunConfiguration, DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH};
pub use cancellation::CancellationToken;
pub use state::RunState;
pub use aggregator::ResultAggregator;
pub use events::{ChannelObserver, ExtractionEvent, ExtractionOutcome, NullObserver, ProgressObserver};
pub use classifier::{classify_catalog_variant, classify_store_rendition, flatten_layers, ExtractionPath, SkipReason};
pub use traversal::{TraversalStrategy, TraversalStrategyFactory};
pub use flat_strategy::FlatCatalogStrategy;
pub use store_strategy::ThemeStoreStrategy;
pub use orchestrator::{run_detached, ExtractionOrchestrator, RunPhase};
