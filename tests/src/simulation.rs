//! # Mesh Simulator
//!
//! Drives several [`RoutingManager`]s over an in-memory broadcast medium.
//! Every node gets a [`RecordingHost`]; a broadcast from one node is handed
//! to each node it is linked to, in address order, and whatever those nodes
//! send in response is queued behind it. Delivery runs until no packets are
//! left in flight.
//!
//! Time is shared: [`Mesh::advance`] moves every node's clock at once.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdrp_02_routing::test_utils::RecordingHost;
use sdrp_02_routing::{
    MprSelectionMode, NetworkAddress, Node, RoutingApi, RoutingConfig, RoutingManager, ServiceId,
    Statistics, TracingDiagnostics,
};
use sdrp_telemetry::{log_event, node_span};

/// Upper bound on transmissions in one delivery run.
pub const DEFAULT_MAX_TRANSMISSIONS: usize = 10_000;

/// One simulated node.
pub struct SimNode {
    pub routing: RoutingManager,
    pub host: Arc<RecordingHost>,
    pub stats: Arc<Statistics>,
}

impl SimNode {
    fn new(address: NetworkAddress, config: &RoutingConfig, now: u64) -> Self {
        let name = format!("n{}", address.as_u16());
        let host = Arc::new(RecordingHost::new(name.clone()));
        host.clock().set(now);

        let stats = Arc::new(
            Statistics::new().with_forward(Arc::new(TracingDiagnostics::new(name))),
        );
        let routing = RoutingManager::new(
            Node::local(address, config),
            host.clone(),
            config.clone(),
        )
        .with_diagnostics(stats.clone());

        Self {
            routing,
            host,
            stats,
        }
    }

    pub fn address(&self) -> NetworkAddress {
        self.routing.local_node().address
    }
}

/// Counters for one delivery run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Broadcasts put on the medium
    pub transmissions: usize,
    /// Broadcasts handed to a linked node
    pub receptions: usize,
    /// Receptions the routing layer rejected
    pub errors: usize,
}

impl DeliveryReport {
    fn absorb(&mut self, other: DeliveryReport) {
        self.transmissions += other.transmissions;
        self.receptions += other.receptions;
        self.errors += other.errors;
    }
}

/// A set of nodes joined by undirected links.
pub struct Mesh {
    config: RoutingConfig,
    nodes: BTreeMap<NetworkAddress, SimNode>,
    links: BTreeMap<NetworkAddress, BTreeSet<NetworkAddress>>,
    now: u64,
    max_transmissions: usize,
}

impl Mesh {
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            config,
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
            now: 0,
            max_transmissions: DEFAULT_MAX_TRANSMISSIONS,
        }
    }

    /// Nodes `1..=count` in a chain: 1 - 2 - ... - count.
    pub fn line(count: u16, config: RoutingConfig) -> Result<Self> {
        let mut mesh = Self::new(config);
        for raw in 1..=count {
            mesh.add_node(NetworkAddress::new(raw))?;
        }
        for raw in 1..count {
            mesh.link(NetworkAddress::new(raw), NetworkAddress::new(raw + 1))?;
        }
        Ok(mesh)
    }

    /// Nodes `1..=count`, every pair linked.
    pub fn clique(count: u16, config: RoutingConfig) -> Result<Self> {
        let mut mesh = Self::new(config);
        for raw in 1..=count {
            mesh.add_node(NetworkAddress::new(raw))?;
        }
        for a in 1..=count {
            for b in (a + 1)..=count {
                mesh.link(NetworkAddress::new(a), NetworkAddress::new(b))?;
            }
        }
        Ok(mesh)
    }

    /// A random connected graph on nodes `1..=count`: a random spanning
    /// tree plus `extra_links` random chords. The same seed gives the same
    /// graph.
    pub fn random_connected(
        count: u16,
        extra_links: usize,
        seed: u64,
        config: RoutingConfig,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mesh = Self::new(config);
        for raw in 1..=count {
            mesh.add_node(NetworkAddress::new(raw))?;
        }
        for raw in 2..=count {
            let parent = rng.gen_range(1..raw);
            mesh.link(NetworkAddress::new(raw), NetworkAddress::new(parent))?;
        }
        if count > 1 {
            for _ in 0..extra_links {
                let a = rng.gen_range(1..=count);
                let b = rng.gen_range(1..=count);
                if a != b {
                    mesh.link(NetworkAddress::new(a), NetworkAddress::new(b))?;
                }
            }
        }
        Ok(mesh)
    }

    #[must_use]
    pub fn with_max_transmissions(mut self, max: usize) -> Self {
        self.max_transmissions = max;
        self
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn add_node(&mut self, address: NetworkAddress) -> Result<&mut SimNode> {
        if self.nodes.contains_key(&address) {
            bail!("node {address} already exists");
        }
        let node = SimNode::new(address, &self.config, self.now);
        self.links.entry(address).or_default();
        Ok(self.nodes.entry(address).or_insert(node))
    }

    pub fn node(&self, address: NetworkAddress) -> Result<&SimNode> {
        self.nodes
            .get(&address)
            .ok_or_else(|| anyhow!("unknown node {address}"))
    }

    pub fn node_mut(&mut self, address: NetworkAddress) -> Result<&mut SimNode> {
        self.nodes
            .get_mut(&address)
            .ok_or_else(|| anyhow!("unknown node {address}"))
    }

    pub fn addresses(&self) -> impl Iterator<Item = NetworkAddress> + '_ {
        self.nodes.keys().copied()
    }

    pub fn link(&mut self, a: NetworkAddress, b: NetworkAddress) -> Result<()> {
        self.node(a)?;
        self.node(b)?;
        if a == b {
            bail!("cannot link {a} to itself");
        }
        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
        Ok(())
    }

    pub fn unlink(&mut self, a: NetworkAddress, b: NetworkAddress) {
        if let Some(peers) = self.links.get_mut(&a) {
            peers.remove(&b);
        }
        if let Some(peers) = self.links.get_mut(&b) {
            peers.remove(&a);
        }
    }

    /// Nodes within radio range of `address`.
    pub fn linked(&self, address: NetworkAddress) -> Vec<NetworkAddress> {
        self.links
            .get(&address)
            .map(|peers| peers.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn offer_service(&mut self, address: NetworkAddress, service: ServiceId) -> Result<()> {
        self.node_mut(address)?.routing.offer_service(service);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: MprSelectionMode) {
        for node in self.nodes.values_mut() {
            node.routing.set_mode(mode);
        }
    }

    /// Move every node's clock forward.
    pub fn advance(&mut self, secs: u64) {
        self.now += secs;
        for node in self.nodes.values() {
            node.host.clock().set(self.now);
        }
    }

    /// Every node beacons once, then the medium drains.
    pub fn beacon_round(&mut self) -> Result<DeliveryReport> {
        for node in self.nodes.values_mut() {
            node.routing.send_beacon()?;
        }
        self.deliver()
    }

    /// `origin` advertises its services, then the medium drains.
    pub fn advertise(&mut self, origin: NetworkAddress) -> Result<DeliveryReport> {
        self.node_mut(origin)?.routing.send_advertisement()?;
        self.deliver()
    }

    /// Every node advertises in address order, draining after each.
    pub fn advertise_all(&mut self) -> Result<DeliveryReport> {
        let origins: Vec<NetworkAddress> = self.addresses().collect();
        let mut report = DeliveryReport::default();
        for origin in origins {
            report.absorb(self.advertise(origin)?);
        }
        Ok(report)
    }

    /// Purge every node's tables.
    pub fn purge(&mut self, max_age: u64) {
        for node in self.nodes.values_mut() {
            node.routing.purge(max_age);
        }
    }

    /// Hand every queued broadcast to the sender's linked nodes until
    /// nothing is left in flight.
    pub fn deliver(&mut self) -> Result<DeliveryReport> {
        let mut report = DeliveryReport::default();
        let mut in_flight: VecDeque<(NetworkAddress, Vec<u8>)> = VecDeque::new();

        for (&address, node) in &self.nodes {
            collect_outbox(address, node, &mut in_flight);
        }

        while let Some((sender, bytes)) = in_flight.pop_front() {
            report.transmissions += 1;
            if report.transmissions > self.max_transmissions {
                bail!(
                    "delivery did not settle within {} transmissions",
                    self.max_transmissions
                );
            }

            for receiver in self.linked(sender) {
                let Some(node) = self.nodes.get_mut(&receiver) else {
                    continue;
                };
                let _span = node_span!(receiver).entered();
                report.receptions += 1;
                if let Err(error) = node.routing.handle_packet(sender, &bytes) {
                    report.errors += 1;
                    log_event!(warn, "simulation", "packet rejected", %sender, %error);
                }
                collect_outbox(receiver, node, &mut in_flight);
            }
        }

        log_event!(
            debug,
            "simulation",
            "medium drained",
            transmissions = report.transmissions,
            receptions = report.receptions
        );
        Ok(report)
    }

    /// Packets sent by all nodes so far, by their statistics.
    pub fn total_packets_sent(&self) -> u64 {
        self.nodes
            .values()
            .map(|node| node.stats.snapshot().packets_sent)
            .sum()
    }
}

fn collect_outbox(
    address: NetworkAddress,
    node: &SimNode,
    in_flight: &mut VecDeque<(NetworkAddress, Vec<u8>)>,
) {
    in_flight.extend(
        node.host
            .take_sent()
            .into_iter()
            .map(|packet| (address, packet.bytes)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(raw: u16) -> NetworkAddress {
        NetworkAddress::new(raw)
    }

    #[test]
    fn test_line_links() {
        let mesh = Mesh::line(4, RoutingConfig::default()).unwrap();
        assert_eq!(mesh.linked(addr(1)), vec![addr(2)]);
        assert_eq!(mesh.linked(addr(2)), vec![addr(1), addr(3)]);
        assert_eq!(mesh.linked(addr(4)), vec![addr(3)]);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut mesh = Mesh::new(RoutingConfig::default());
        mesh.add_node(addr(1)).unwrap();
        assert!(mesh.add_node(addr(1)).is_err());
    }

    #[test]
    fn test_link_unknown_node_rejected() {
        let mut mesh = Mesh::line(2, RoutingConfig::default()).unwrap();
        assert!(mesh.link(addr(1), addr(9)).is_err());
        assert!(mesh.link(addr(1), addr(1)).is_err());
    }

    #[test]
    fn test_unlink() {
        let mut mesh = Mesh::line(3, RoutingConfig::default()).unwrap();
        mesh.unlink(addr(2), addr(3));
        assert_eq!(mesh.linked(addr(2)), vec![addr(1)]);
        assert!(mesh.linked(addr(3)).is_empty());
    }

    #[test]
    fn test_random_connected_is_reproducible() {
        let a = Mesh::random_connected(12, 6, 7, RoutingConfig::default()).unwrap();
        let b = Mesh::random_connected(12, 6, 7, RoutingConfig::default()).unwrap();
        for raw in 1..=12 {
            assert_eq!(a.linked(addr(raw)), b.linked(addr(raw)));
            if raw > 1 {
                assert!(!a.linked(addr(raw)).is_empty());
            }
        }
    }

    #[test]
    fn test_advance_moves_every_clock() {
        let mut mesh = Mesh::line(3, RoutingConfig::default()).unwrap();
        mesh.advance(12);
        for address in mesh.addresses().collect::<Vec<_>>() {
            assert_eq!(mesh.node(address).unwrap().host.clock().now().as_secs(), 12);
        }
        // Late joiners start at mesh time
        mesh.add_node(addr(9)).unwrap();
        assert_eq!(mesh.node(addr(9)).unwrap().host.clock().now().as_secs(), 12);
    }

    #[test]
    fn test_quiet_mesh_delivers_nothing() {
        let mut mesh = Mesh::line(3, RoutingConfig::default()).unwrap();
        // No node offers a service, so nothing is advertised
        let report = mesh.advertise_all().unwrap();
        assert_eq!(report, DeliveryReport::default());
    }

    #[test]
    fn test_transmission_bound() {
        let config = RoutingConfig {
            mode: MprSelectionMode::Flooding,
            ..RoutingConfig::default()
        };
        let mut mesh = Mesh::line(4, config).unwrap().with_max_transmissions(1);
        mesh.offer_service(addr(1), 5).unwrap();
        assert!(mesh.advertise(addr(1)).is_err());
    }
}
