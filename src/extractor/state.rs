//! Per-run mutable state
//!
//! RunState is exclusively owned by the orchestrator's worker for the
//! duration of one run and discarded when the run ends. No locking is
//! needed because no other actor mutates it; only the cancellation
//! token inside it is shared.

use log::debug;

use crate::catalog::rendition::Scale;
use crate::catalog::source::RenditionSource;
use crate::extractor::cancellation::CancellationToken;
use crate::utils::filename_utils::FilenameUniquifier;

/// Mutable bookkeeping for one extraction run
pub struct RunState {
    /// Total item count, as known or capped
    total_count: usize,
    /// Items loaded (produced or skipped-and-counted) so far
    loaded_count: usize,
    /// Cancellation flag, polled cooperatively
    token: CancellationToken,
    /// Memoized "container has any higher-density variant" flag
    high_density: Option<bool>,
    /// Filename counter map for this run
    uniquifier: FilenameUniquifier,
}

impl RunState {
    /// Create state for a run over `total_count` items
    pub fn new(total_count: usize, token: CancellationToken) -> Self {
        RunState {
            total_count,
            loaded_count: 0,
            token,
            high_density: None,
            uniquifier: FilenameUniquifier::new(),
        }
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Count one item as loaded (produced or skipped)
    pub fn mark_loaded(&mut self) {
        self.loaded_count += 1;
    }

    /// Items loaded so far
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    /// Total item count for the run
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Progress fraction in [0, 1]
    ///
    /// A logical name can yield several counted variants, so the raw
    /// ratio can overshoot near the end of a run; it is clamped so
    /// callers never observe a malformed fraction.
    pub fn progress(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        (self.loaded_count as f64 / self.total_count as f64).min(1.0)
    }

    /// Whether the capped item budget has been consumed
    pub fn reached_capacity(&self) -> bool {
        self.loaded_count >= self.total_count
    }

    /// Resolve a requested filename to a run-unique one
    pub fn unique_filename(&mut self, requested: &str) -> String {
        self.uniquifier.uniquify(requested)
    }

    /// Whether the container holds any variant with scale above 1x
    ///
    /// Computed lazily once per run by scanning the source, then
    /// memoized; resolve errors during the scan count as no match.
    pub fn container_has_high_density(&mut self, source: &dyn RenditionSource) -> bool {
        if let Some(flag) = self.high_density {
            return flag;
        }

        let flag = scan_for_high_density(source);
        debug!("Container high-density content: {}", flag);
        self.high_density = Some(flag);
        flag
    }
}

/// Scan a source for any variant authored above 1x
fn scan_for_high_density(source: &dyn RenditionSource) -> bool {
    let names = source.image_names();
    if !names.is_empty() {
        for name in &names {
            for scale in [Scale::Double, Scale::Triple] {
                match source.variant(name, scale) {
                    Ok(Some(_)) => return true,
                    Ok(None) => {}
                    Err(e) => debug!("High-density scan skipped {}{}: {}", name, scale.suffix(), e),
                }
            }
        }
        return false;
    }

    source
        .rendition_keys()
        .iter()
        .any(|key| key.scale.factor() > 1)
}
