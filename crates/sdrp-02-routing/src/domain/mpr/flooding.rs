use sdrp_01_bloom_filters::CountingBloomFilter;

use super::{MprCalculator, MprSelectionMode};
use crate::domain::node::NeighbourTable;

/// Selects every node: the result contains any address.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloodingCalculator;

impl MprCalculator for FloodingCalculator {
    fn mode(&self) -> MprSelectionMode {
        MprSelectionMode::Flooding
    }

    fn calculate(&self, _neighbours: &NeighbourTable) -> CountingBloomFilter {
        CountingBloomFilter::universal()
    }
}
