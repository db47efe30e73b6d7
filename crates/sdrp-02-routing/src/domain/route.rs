//! Routes to service providers and reverse paths to clients

use sdrp_01_bloom_filters::CountingBloomFilter;

use super::types::{NetworkAddress, Timestamp};

/// A path to `server` through the 1-hop neighbour `next_hop`.
///
/// Routes are keyed by `(server, next_hop)`; equality ignores the other
/// fields so that a newer advertisement replaces an older route.
#[derive(Debug, Clone)]
pub struct Route {
    pub server: NetworkAddress,
    pub next_hop: NetworkAddress,
    /// Services reachable at `server`
    pub services: CountingBloomFilter,
    pub hops: u8,
    /// When this route was recorded
    pub recorded_at: Timestamp,
}

impl Route {
    /// Hop count marking a reverse path whose length is unknown.
    pub const MAX_HOPS: u8 = u8::MAX;

    pub fn new(
        server: NetworkAddress,
        next_hop: NetworkAddress,
        services: CountingBloomFilter,
        hops: u8,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            server,
            next_hop,
            services,
            hops,
            recorded_at,
        }
    }

    /// Whether this route and `other` share the `(server, next_hop)` key.
    pub fn same_path(&self, other: &Route) -> bool {
        self.server == other.server && self.next_hop == other.next_hop
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.same_path(other)
    }
}

impl Eq for Route {}
