//! Ordered result collection
//!
//! The aggregator is the append-only sequence of descriptors a run
//! produces, in traversal order. It is exclusively owned by the run's
//! worker and handed to the caller at completion.

use crate::catalog::descriptor::AssetDescriptor;

/// Append-only, ordered collection of produced descriptors
#[derive(Default)]
pub struct ResultAggregator {
    descriptors: Vec<AssetDescriptor>,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        ResultAggregator::default()
    }

    /// Append one descriptor; descriptors are never removed or reordered
    pub fn push(&mut self, descriptor: AssetDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Number of descriptors produced so far
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing has been produced yet
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Borrow the produced descriptors in append order
    pub fn descriptors(&self) -> &[AssetDescriptor] {
        &self.descriptors
    }

    /// Consume the aggregator, yielding the descriptors in append order
    pub fn into_descriptors(self) -> Vec<AssetDescriptor> {
        self.descriptors
    }
}
