//! Traversal strategy definitions
//!
//! This module defines the strategy pattern for the two container
//! enumeration models, allowing the orchestrator to drive either one
//! through a single interface.

use log::info;

use crate::catalog::errors::CatalogResult;
use crate::catalog::mode::CatalogMode;
use crate::catalog::source::RenditionSource;
use crate::extractor::aggregator::ResultAggregator;
use crate::extractor::config::RunConfiguration;
use crate::extractor::events::ProgressObserver;
use crate::extractor::state::RunState;

/// Strategy for traversing one container enumeration model
///
/// This trait defines the interface both traversals implement. A
/// strategy walks its enumeration surface in source order, dispatches
/// every entry through classification and materialization, and owns
/// the per-entry skip/count bookkeeping. Fatal conditions are the Err
/// side; per-entry failures never surface here.
pub trait TraversalStrategy {
    /// Traverse the source, appending descriptors to the aggregator
    ///
    /// # Arguments
    /// * `source` - Opened rendition source
    /// * `config` - Immutable run configuration
    /// * `state` - Mutable per-run bookkeeping
    /// * `aggregator` - Append-only result collection
    /// * `observer` - Progress consumer
    ///
    /// # Returns
    /// Ok when the traversal ran to its end (or observed cancellation),
    /// an error only for fatal conditions
    fn traverse(&mut self,
                source: &dyn RenditionSource,
                config: &RunConfiguration,
                state: &mut RunState,
                aggregator: &mut ResultAggregator,
                observer: &dyn ProgressObserver) -> CatalogResult<()>;
}

/// Factory for creating the traversal strategy matching a mode
pub struct TraversalStrategyFactory;

impl TraversalStrategyFactory {
    /// Create the strategy for the given catalog mode
    ///
    /// # Arguments
    /// * `mode` - Mode selected for this run
    ///
    /// # Returns
    /// A strategy that can traverse that enumeration model
    pub fn create_strategy(mode: CatalogMode) -> Box<dyn TraversalStrategy> {
        match mode {
            CatalogMode::FlatCatalog => {
                info!("Using flat-catalog traversal strategy");
                Box::new(super::flat_strategy::FlatCatalogStrategy::new())
            }
            CatalogMode::ThemeStore => {
                info!("Using theme-store traversal strategy");
                Box::new(super::store_strategy::ThemeStoreStrategy::new())
            }
        }
    }
}
