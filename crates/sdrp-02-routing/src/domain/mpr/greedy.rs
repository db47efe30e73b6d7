//! Greedy set-cover relay selection
//!
//! 1. Required coverage: union of every neighbour's 1-hop filter (the
//!    2-hop neighbourhood).
//! 2. A neighbour whose removal from the required coverage would clear a
//!    cell is the sole provider of some 2-hop address and is selected.
//! 3. Remaining neighbours are tried in order of descending coverage size;
//!    each one not already subsumed by the coverage so far is selected,
//!    until coverage matches the requirement.

use std::collections::BTreeSet;

use sdrp_01_bloom_filters::{CountingBloomFilter, DEFAULT_FALSE_POSITIVE_RATE};
use tracing::debug;

use super::{MprCalculator, MprSelectionMode};
use crate::domain::node::{NeighbourTable, Node};
use crate::domain::types::NetworkAddress;

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCoverCalculator;

impl GreedyCoverCalculator {
    /// Addresses chosen as relays.
    ///
    /// The first non-empty neighbour filter fixes the comparison
    /// dimensions. Neighbours whose filters have other dimensions cannot
    /// be compared and are selected outright; neighbours with empty
    /// filters contribute no coverage and are skipped.
    pub fn select(&self, neighbours: &NeighbourTable) -> BTreeSet<NetworkAddress> {
        let mut selected = BTreeSet::new();

        let Some(reference) = neighbours
            .values()
            .map(|node| &node.neighbours)
            .find(|filter| filter.table_size() > 0)
        else {
            return selected;
        };
        let (table_size, hash_count) = (reference.table_size(), reference.hash_count());

        let mut required = CountingBloomFilter::with_dimensions(table_size, hash_count);
        let mut comparable: Vec<&Node> = Vec::with_capacity(neighbours.len());

        for node in neighbours.values() {
            if node.neighbours.table_size() == 0 {
                continue;
            }
            match required.union(&node.neighbours) {
                Ok(()) => comparable.push(node),
                Err(error) => {
                    debug!(address = %node.address, %error, "incomparable neighbour filter, selecting");
                    selected.insert(node.address);
                }
            }
        }

        let mut coverage = CountingBloomFilter::with_dimensions(table_size, hash_count);
        let mut candidates: Vec<&Node> = Vec::new();

        for node in comparable {
            let sole_provider = required
                .removal_results_in_difference(&node.neighbours)
                .unwrap_or(true);
            if sole_provider && coverage.union(&node.neighbours).is_ok() {
                selected.insert(node.address);
            } else {
                candidates.push(node);
            }
        }

        // Stable: equal coverage keeps address order
        candidates.sort_by_key(|node| std::cmp::Reverse(node.neighbours.set_bytes()));

        for node in candidates {
            if coverage.difference(&required).map_or(true, |d| d == 0) {
                break;
            }
            if !coverage.contains_filter(&node.neighbours) && coverage.union(&node.neighbours).is_ok() {
                selected.insert(node.address);
            }
        }

        selected
    }
}

impl MprCalculator for GreedyCoverCalculator {
    fn mode(&self) -> MprSelectionMode {
        MprSelectionMode::Mpr
    }

    fn calculate(&self, neighbours: &NeighbourTable) -> CountingBloomFilter {
        let selected = self.select(neighbours);
        let mut relays =
            CountingBloomFilter::with_capacity(selected.len() * 2, DEFAULT_FALSE_POSITIVE_RATE);
        for address in &selected {
            relays.insert(address.as_u16());
        }
        relays
    }
}
