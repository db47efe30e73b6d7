//! # Multipoint Relay Selection
//!
//! A calculator maps the current neighbour table to a filter of relay
//! addresses. Receivers relay an advertisement when their own address is
//! in that filter.
//!
//! | Mode          | Calculator                | Result                          |
//! |---------------|---------------------------|---------------------------------|
//! | `Flooding`    | [`FloodingCalculator`]    | universal filter (everyone)     |
//! | `Mpr`         | [`GreedyCoverCalculator`] | greedy 2-hop dominating set     |
//! | `ReducedMpr`  | [`ReducedMprCalculator`]  | statistically novel neighbours  |

mod flooding;
mod greedy;
mod reduced;

pub use flooding::FloodingCalculator;
pub use greedy::GreedyCoverCalculator;
pub use reduced::ReducedMprCalculator;

use std::fmt;

use sdrp_01_bloom_filters::CountingBloomFilter;
use serde::{Deserialize, Serialize};

use super::node::NeighbourTable;
use super::types::NetworkAddress;

/// Relay selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MprSelectionMode {
    /// Every node relays
    Flooding,
    /// Greedy set cover over 2-hop neighbourhoods; the only mode that beacons
    #[default]
    Mpr,
    /// Topology piggybacked on advertisements, novelty-based selection
    ReducedMpr,
}

impl fmt::Display for MprSelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flooding => "flooding",
            Self::Mpr => "mpr",
            Self::ReducedMpr => "reduced_mpr",
        };
        f.write_str(name)
    }
}

/// Computes a relay filter from a neighbour table.
///
/// Implementations are stateless: the same table always yields the same filter.
pub trait MprCalculator: Send + Sync + fmt::Debug {
    fn mode(&self) -> MprSelectionMode;

    fn calculate(&self, neighbours: &NeighbourTable) -> CountingBloomFilter;
}

/// Build the calculator for `mode` on behalf of the node at `local_address`.
pub fn calculator_for(mode: MprSelectionMode, local_address: NetworkAddress) -> Box<dyn MprCalculator> {
    match mode {
        MprSelectionMode::Flooding => Box::new(FloodingCalculator),
        MprSelectionMode::Mpr => Box::new(GreedyCoverCalculator),
        MprSelectionMode::ReducedMpr => Box::new(ReducedMprCalculator::new(local_address)),
    }
}
