//! Nodes as seen by the routing layer

use std::cmp::Ordering;
use std::collections::BTreeMap;

use sdrp_01_bloom_filters::CountingBloomFilter;

use super::config::RoutingConfig;
use super::types::{NetworkAddress, ServiceId, Timestamp};

/// Neighbours keyed by address, iterated in address order.
pub type NeighbourTable = BTreeMap<NetworkAddress, Node>;

/// A node: its address, offered services, 1-hop neighbours and last sighting.
///
/// Equality and ordering consider the address only, so a node table keyed
/// by address holds at most one entry per node.
#[derive(Debug, Clone)]
pub struct Node {
    pub address: NetworkAddress,
    /// Services this node offers
    pub services: CountingBloomFilter,
    /// Addresses of this node's 1-hop neighbours, as it advertises them
    pub neighbours: CountingBloomFilter,
    pub last_seen: Timestamp,
}

impl Node {
    pub fn new(
        address: NetworkAddress,
        services: CountingBloomFilter,
        neighbours: CountingBloomFilter,
        last_seen: Timestamp,
    ) -> Self {
        Self {
            address,
            services,
            neighbours,
            last_seen,
        }
    }

    /// A neighbour sighting: no service information, just topology.
    pub fn sighting(
        address: NetworkAddress,
        neighbours: CountingBloomFilter,
        last_seen: Timestamp,
    ) -> Self {
        Self::new(address, CountingBloomFilter::empty(), neighbours, last_seen)
    }

    /// The local node, with filters sized from `config`.
    pub fn local(address: NetworkAddress, config: &RoutingConfig) -> Self {
        Self::new(
            address,
            CountingBloomFilter::with_capacity(
                config.service_filter_capacity,
                config.false_positive_rate,
            ),
            CountingBloomFilter::with_capacity(
                config.predicted_element_count,
                config.false_positive_rate,
            ),
            Timestamp::default(),
        )
    }

    pub fn offer_service(&mut self, service: ServiceId) {
        self.services.insert(service);
    }

    pub fn withdraw_service(&mut self, service: ServiceId) {
        self.services.remove(service);
    }

    pub fn offers_service(&self, service: ServiceId) -> bool {
        self.services.contains(service)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.address)
    }
}
