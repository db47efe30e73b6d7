//! # Local Area Monitor
//!
//! Tracks 1-hop neighbours, ages them out and computes the relay filter
//! with the active MPR calculator.
//!
//! ## State
//!
//! - Neighbour table, keyed by address
//! - Aggregate neighbour filter: the addresses of all current neighbours,
//!   rebuilt whenever the address set changes
//! - Cached relay filter, dropped whenever a neighbour is added or lost,
//!   a neighbour's own filter changes, or the mode changes
//!
//! ## Events
//!
//! [`NeighbourEvent::Added`] and [`NeighbourEvent::Lost`] are returned to
//! the caller and delivered to every subscribed [`NeighbourListener`].

mod listeners;

pub use listeners::{ListenerId, ListenerRegistry, NeighbourEvent, NeighbourListener};

use std::sync::Arc;

use sdrp_01_bloom_filters::{CountingBloomFilter, DEFAULT_FALSE_POSITIVE_RATE};
use tracing::{debug, trace};

use super::mpr::{calculator_for, MprCalculator, MprSelectionMode};
use super::node::{NeighbourTable, Node};
use super::types::{NetworkAddress, Timestamp};

#[derive(Debug)]
pub struct LocalAreaMonitor {
    local_address: NetworkAddress,
    mode: MprSelectionMode,
    calculator: Box<dyn MprCalculator>,
    max_age: u64,
    neighbours: NeighbourTable,
    neighbour_filter: CountingBloomFilter,
    cached_relays: Option<CountingBloomFilter>,
    false_positive_rate: f64,
    listeners: ListenerRegistry,
}

impl LocalAreaMonitor {
    /// Neighbours unseen for longer than this are purged.
    pub const DEFAULT_MAX_AGE: u64 = 15;

    pub fn new(local_address: NetworkAddress, mode: MprSelectionMode) -> Self {
        Self {
            local_address,
            mode,
            calculator: calculator_for(mode, local_address),
            max_age: Self::DEFAULT_MAX_AGE,
            neighbours: NeighbourTable::new(),
            neighbour_filter: CountingBloomFilter::empty(),
            cached_relays: None,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Rate used to size the aggregate neighbour filter.
    #[must_use]
    pub fn with_false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = rate;
        self
    }

    #[must_use]
    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn mode(&self) -> MprSelectionMode {
        self.mode
    }

    /// Switch relay selection strategy.
    pub fn set_mode(&mut self, mode: MprSelectionMode) {
        debug!(from = %self.mode, to = %mode, "mpr mode changed");
        self.mode = mode;
        self.calculator = calculator_for(mode, self.local_address);
        self.cached_relays = None;
    }

    pub fn max_neighbour_age(&self) -> u64 {
        self.max_age
    }

    pub fn set_max_neighbour_age(&mut self, max_age: u64) {
        self.max_age = max_age;
    }

    pub fn neighbours(&self) -> impl Iterator<Item = &Node> {
        self.neighbours.values()
    }

    pub fn neighbour(&self, address: NetworkAddress) -> Option<&Node> {
        self.neighbours.get(&address)
    }

    pub fn neighbour_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Addresses of all current neighbours. Empty (`M = 0`) with no neighbours.
    pub fn neighbour_filter(&self) -> &CountingBloomFilter {
        &self.neighbour_filter
    }

    pub fn subscribe(&mut self, listener: &Arc<dyn NeighbourListener>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Record a sighting of `node`, replacing any stored entry for its address.
    ///
    /// A new address yields [`NeighbourEvent::Added`]. A changed neighbours
    /// filter, including one whose dimensions differ from the stored one,
    /// invalidates the cached relay filter.
    pub fn node_was_seen(&mut self, node: Node) -> Vec<NeighbourEvent> {
        let mut events = Vec::new();

        match self.neighbours.get(&node.address) {
            None => {
                debug!(address = %node.address, "neighbour added");
                events.push(NeighbourEvent::Added(node.clone()));
            }
            Some(existing) => {
                let unchanged = existing
                    .neighbours
                    .try_eq(&node.neighbours)
                    .unwrap_or(false);
                if !unchanged {
                    trace!(address = %node.address, "neighbour topology changed");
                    self.cached_relays = None;
                }
            }
        }

        self.neighbours.insert(node.address, node);

        if !events.is_empty() {
            self.cached_relays = None;
            self.rebuild_neighbour_filter();
            self.listeners.notify(&events);
        }
        events
    }

    /// Evict every neighbour last seen more than the max age before `now`.
    pub fn purge(&mut self, now: Timestamp) -> Vec<NeighbourEvent> {
        let max_age = self.max_age;
        let (stale, fresh): (NeighbourTable, NeighbourTable) = std::mem::take(&mut self.neighbours)
            .into_iter()
            .partition(|(_, node)| now.elapsed_since(node.last_seen) > max_age);
        self.neighbours = fresh;

        let events: Vec<NeighbourEvent> = stale
            .into_values()
            .map(|node| {
                debug!(address = %node.address, last_seen = node.last_seen.as_secs(), "neighbour lost");
                NeighbourEvent::Lost(node)
            })
            .collect();

        if !events.is_empty() {
            self.cached_relays = None;
        }
        self.rebuild_neighbour_filter();
        self.listeners.notify(&events);
        events
    }

    /// Relay filter for the current neighbour table.
    ///
    /// With no neighbours there is nobody to select, so every receiver relays.
    pub fn mpr_filter(&mut self) -> CountingBloomFilter {
        if self.neighbours.is_empty() {
            return CountingBloomFilter::universal();
        }
        if let Some(cached) = &self.cached_relays {
            return cached.clone();
        }

        let relays = self.calculator.calculate(&self.neighbours);
        trace!(mode = %self.mode, relays = %relays, "relay filter computed");
        self.cached_relays = Some(relays.clone());
        relays
    }

    /// Whether a relay filter is cached for the current state.
    pub fn has_cached_relays(&self) -> bool {
        self.cached_relays.is_some()
    }

    fn rebuild_neighbour_filter(&mut self) {
        if self.neighbours.is_empty() {
            self.neighbour_filter = CountingBloomFilter::empty();
            return;
        }

        let mut filter =
            CountingBloomFilter::with_capacity(self.neighbours.len(), self.false_positive_rate);
        for address in self.neighbours.keys() {
            filter.insert(address.as_u16());
        }
        self.neighbour_filter = filter;
    }
}
