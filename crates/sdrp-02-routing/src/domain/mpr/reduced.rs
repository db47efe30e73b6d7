//! Reduced MPR selection
//!
//! Works from the neighbour filters piggybacked on advertisements, which
//! may differ in size between senders. Each neighbour is scored by how
//! much its neighbourhood differs from what this node already reaches;
//! only the most novel neighbours become relays.
//!
//! 1. Drop neighbours with empty filters, and neighbours whose filter is
//!    nearly identical (Hamming ratio below [`SIMILARITY_THRESHOLD`]) to
//!    one already kept.
//! 2. Score each survivor against a filter of the same dimensions holding
//!    the local address and every other neighbour. Zero scores are dropped.
//! 3. Keep scores at or above `floor(mean + stddev)`.
//! 4. Rotation: walk the survivors in ascending score order. From each
//!    anchor, the first later survivor the anchor does not list as a
//!    neighbour is selected and becomes the next anchor. An anchor that
//!    lists every later survivor is selected itself, and the walk resumes
//!    from the survivor after it.

use sdrp_01_bloom_filters::CountingBloomFilter;

use super::{MprCalculator, MprSelectionMode};
use crate::domain::node::{NeighbourTable, Node};
use crate::domain::types::NetworkAddress;

/// Hamming ratio under which two same-sized neighbour filters are redundant.
pub const SIMILARITY_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
pub struct ReducedMprCalculator {
    local_address: NetworkAddress,
}

struct Scored<'a> {
    node: &'a Node,
    score: f64,
}

impl ReducedMprCalculator {
    pub fn new(local_address: NetworkAddress) -> Self {
        Self { local_address }
    }

    /// Addresses chosen as relays, in selection order.
    pub fn select(&self, neighbours: &NeighbourTable) -> Vec<NetworkAddress> {
        rotate(&self.novel_neighbours(neighbours))
    }

    /// Survivors of the similarity, novelty and threshold passes, ascending by score.
    fn novel_neighbours<'a>(&self, neighbours: &'a NeighbourTable) -> Vec<Scored<'a>> {
        let mut scored: Vec<Scored<'a>> = eliminate_similar(neighbours)
            .into_iter()
            .filter_map(|node| {
                let score = self.novelty(node, neighbours)?;
                (score > 0.0).then_some(Scored { node, score })
            })
            .collect();

        let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
        let upper_bound = (mean(&scores) + std_dev(&scores)).floor();
        scored.retain(|s| s.score >= upper_bound);

        // Stable: equal scores keep address order
        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored
    }

    /// Presence difference between `candidate`'s neighbours and everything
    /// this node reaches without it.
    fn novelty(&self, candidate: &Node, neighbours: &NeighbourTable) -> Option<f64> {
        let theirs = &candidate.neighbours;
        let mut ours = CountingBloomFilter::with_dimensions(theirs.table_size(), theirs.hash_count());

        ours.insert(self.local_address.as_u16());
        neighbours
            .keys()
            .filter(|&&address| address != candidate.address)
            .for_each(|address| ours.insert(address.as_u16()));

        ours.set_difference(theirs).ok().map(|d| d as f64)
    }
}

impl MprCalculator for ReducedMprCalculator {
    fn mode(&self) -> MprSelectionMode {
        MprSelectionMode::ReducedMpr
    }

    fn calculate(&self, neighbours: &NeighbourTable) -> CountingBloomFilter {
        let survivors = self.novel_neighbours(neighbours);
        if survivors.is_empty() {
            return CountingBloomFilter::universal();
        }

        let count = survivors.len();
        let mut relays = CountingBloomFilter::with_capacity(count, count as f64 / 10.0);
        for address in rotate(&survivors) {
            relays.insert(address.as_u16());
        }
        relays
    }
}

fn eliminate_similar(neighbours: &NeighbourTable) -> Vec<&Node> {
    let mut kept: Vec<&Node> = Vec::with_capacity(neighbours.len());

    for node in neighbours.values() {
        let size = node.neighbours.table_size();
        if size == 0 {
            continue;
        }
        let redundant = kept.iter().any(|other| {
            other.neighbours.table_size() == size
                && other
                    .neighbours
                    .set_difference(&node.neighbours)
                    .is_ok_and(|d| (d as f64 / size as f64) < SIMILARITY_THRESHOLD)
        });
        if !redundant {
            kept.push(node);
        }
    }
    kept
}

fn rotate(survivors: &[Scored<'_>]) -> Vec<NetworkAddress> {
    let mut selected: Vec<NetworkAddress> = Vec::new();
    let mut i = 0;
    while i < survivors.len() {
        let anchor = survivors[i].node;
        let next = (i + 1..survivors.len())
            .find(|&j| !anchor.neighbours.contains(survivors[j].node.address.as_u16()));

        let chosen = match next {
            Some(j) => {
                i = j;
                survivors[j].node.address
            }
            None => {
                i += 1;
                anchor.address
            }
        };
        if !selected.contains(&chosen) {
            selected.push(chosen);
        }
    }
    selected
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
