use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use sdrp_02_routing::test_utils::RecordingHost;
use sdrp_02_routing::{
    ConfigProvider, MprSelectionMode, NetworkAddress, Packet, RoutingApi, RoutingConfig, Sdrp,
    ServiceId, Timestamp, TomlConfigProvider,
};
use sdrp_telemetry::init_test_logging;

use crate::simulation::Mesh;

const SERVICE: ServiceId = 42;

fn addr(raw: u16) -> NetworkAddress {
    NetworkAddress::new(raw)
}

fn config(mode: MprSelectionMode) -> RoutingConfig {
    RoutingConfig {
        mode,
        ..RoutingConfig::default()
    }
}

/// Hop distance from `origin` to every reachable node.
fn distances(mesh: &Mesh, origin: NetworkAddress) -> BTreeMap<NetworkAddress, usize> {
    let mut distances = BTreeMap::from([(origin, 0)]);
    let mut queue = VecDeque::from([origin]);
    while let Some(current) = queue.pop_front() {
        let next = distances[&current] + 1;
        for peer in mesh.linked(current) {
            if !distances.contains_key(&peer) {
                distances.insert(peer, next);
                queue.push_back(peer);
            }
        }
    }
    distances
}

// =============================================================================
// Flooding
// =============================================================================

#[test]
fn test_flooding_line_builds_routes_back_to_server() {
    init_test_logging();
    let mut mesh = Mesh::line(4, config(MprSelectionMode::Flooding)).unwrap();
    mesh.offer_service(addr(4), SERVICE).unwrap();

    let report = mesh.advertise(addr(4)).unwrap();
    // Origin plus one relay from every other node
    assert_eq!(report.transmissions, 4);
    assert_eq!(report.errors, 0);

    let far = mesh.node(addr(1)).unwrap().routing.routes_to_service(SERVICE);
    assert_eq!(far[0].server, addr(4));
    assert_eq!(far[0].next_hop, addr(2));
    assert_eq!(far[0].hops, 2);

    let near = mesh.node(addr(3)).unwrap().routing.routes_to_service(SERVICE);
    assert_eq!(near[0].next_hop, addr(4));
    assert_eq!(near[0].hops, 0);

    // Node 2 also heard node 1's relay, which is the longer way round
    let middle = mesh.node(addr(2)).unwrap().routing.routes_to_service(SERVICE);
    assert_eq!(middle.len(), 2);
    assert_eq!((middle[0].next_hop, middle[0].hops), (addr(3), 1));
    assert_eq!((middle[1].next_hop, middle[1].hops), (addr(1), 3));

    // The server keeps no route to itself
    assert!(!mesh.node(addr(4)).unwrap().routing.has_routes_to_service(SERVICE));
}

#[test]
fn test_flooding_reaches_every_node_of_a_random_mesh() {
    init_test_logging();
    for seed in [1, 2, 3] {
        let mut mesh =
            Mesh::random_connected(20, 15, seed, config(MprSelectionMode::Flooding)).unwrap();
        mesh.offer_service(addr(1), SERVICE).unwrap();

        let report = mesh.advertise(addr(1)).unwrap();
        assert_eq!(report.transmissions, 20, "seed {seed}");

        let distances = distances(&mesh, addr(1));
        for address in mesh.addresses().filter(|&a| a != addr(1)) {
            let routes = mesh.node(address).unwrap().routing.routes_to_service(SERVICE);
            let best = routes.first().unwrap_or_else(|| panic!("{address} has no route"));

            assert_eq!(best.server, addr(1));
            assert!(mesh.linked(address).contains(&best.next_hop));
            // Breadth-first delivery: the best copy came along a shortest path
            assert_eq!(usize::from(best.hops), distances[&address] - 1, "seed {seed}");
        }
    }
}

#[test]
fn test_each_new_advertisement_is_relayed_again() {
    let mut mesh = Mesh::line(3, config(MprSelectionMode::Flooding)).unwrap();
    mesh.offer_service(addr(1), SERVICE).unwrap();

    for round in 1..=3u8 {
        assert_eq!(mesh.advertise(addr(1)).unwrap().transmissions, 3);
        assert_eq!(mesh.node(addr(1)).unwrap().routing.sequence_number(), round);
    }
    let stats = mesh.node(addr(3)).unwrap().stats.snapshot();
    assert_eq!(stats.advertisements_sent, 3);
}

#[test]
fn test_ttl_limits_reach() {
    let provider = TomlConfigProvider::parse(
        r#"
        [routing]
        mode = "flooding"
        max_ttl = 2
        "#,
    )
    .unwrap();
    let mut mesh = Mesh::line(6, provider.routing_config()).unwrap();
    mesh.offer_service(addr(6), SERVICE).unwrap();
    mesh.advertise(addr(6)).unwrap();

    // Node 3 relays with hops 3; node 2 records the route but stops there
    let routes = mesh.node(addr(2)).unwrap().routing.routes_to_service(SERVICE);
    assert_eq!(routes[0].hops, 3);
    assert!(mesh.node(addr(2)).unwrap().stats.snapshot().packets_dropped >= 1);
    assert!(!mesh.node(addr(1)).unwrap().routing.has_routes_to_service(SERVICE));
}

// =============================================================================
// Greedy MPR
// =============================================================================

#[test]
fn test_mpr_line_learns_neighbours_and_routes() {
    init_test_logging();
    let mut mesh = Mesh::line(5, config(MprSelectionMode::Mpr)).unwrap();

    // The first round announces presence, the second announces neighbourhoods
    let first = mesh.beacon_round().unwrap();
    assert_eq!(first.transmissions, 5);
    assert_eq!(first.receptions, 8);
    mesh.beacon_round().unwrap();

    for address in mesh.addresses().collect::<Vec<_>>() {
        let node = mesh.node(address).unwrap();
        assert_eq!(node.routing.neighbour_count(), mesh.linked(address).len());
        for peer in mesh.linked(address) {
            assert!(node.routing.local_node().neighbours.contains(peer.as_u16()));
        }
    }

    mesh.offer_service(addr(5), SERVICE).unwrap();
    let report = mesh.advertise(addr(5)).unwrap();
    assert!(report.transmissions <= 5);

    for raw in 1..=4u16 {
        let routes = mesh.node(addr(raw)).unwrap().routing.routes_to_service(SERVICE);
        assert_eq!(routes[0].server, addr(5));
        assert_eq!(routes[0].next_hop, addr(raw + 1));
        assert_eq!(usize::from(routes[0].hops), usize::from(4 - raw));
    }
}

#[test]
fn test_mpr_relays_less_than_flooding_in_a_dense_mesh() {
    let transmissions = |mode| {
        let mut mesh = Mesh::clique(10, config(mode)).unwrap();
        mesh.beacon_round().unwrap();
        mesh.beacon_round().unwrap();
        mesh.offer_service(addr(1), SERVICE).unwrap();
        let report = mesh.advertise(addr(1)).unwrap();

        for raw in 2..=10 {
            assert!(mesh.node(addr(raw)).unwrap().routing.has_routes_to_service(SERVICE));
        }
        report.transmissions
    };

    let flooding = transmissions(MprSelectionMode::Flooding);
    let mpr = transmissions(MprSelectionMode::Mpr);
    assert_eq!(flooding, 10);
    assert!(mpr < flooding, "mpr {mpr} vs flooding {flooding}");
}

#[test]
fn test_beacons_only_in_mpr_mode() {
    let mut mesh = Mesh::line(3, config(MprSelectionMode::Flooding)).unwrap();
    assert_eq!(mesh.beacon_round().unwrap().transmissions, 0);

    mesh.set_mode(MprSelectionMode::ReducedMpr);
    assert_eq!(mesh.beacon_round().unwrap().transmissions, 0);

    mesh.set_mode(MprSelectionMode::Mpr);
    assert_eq!(mesh.beacon_round().unwrap().transmissions, 3);
}

// =============================================================================
// Reduced MPR
// =============================================================================

#[test]
fn test_reduced_mpr_learns_topology_from_advertisements() {
    init_test_logging();
    let mut mesh = Mesh::line(5, config(MprSelectionMode::ReducedMpr)).unwrap();
    mesh.offer_service(addr(5), SERVICE).unwrap();

    // Nobody knows anybody yet, so every receiver is beyond its sender
    let report = mesh.advertise(addr(5)).unwrap();
    assert_eq!(report.transmissions, 5);

    for address in mesh.addresses().collect::<Vec<_>>() {
        let node = mesh.node(address).unwrap();
        assert_eq!(
            node.routing.neighbour_count(),
            mesh.linked(address).len(),
            "{address}"
        );
    }

    let routes = mesh.node(addr(1)).unwrap().routing.routes_to_service(SERVICE);
    assert_eq!((routes[0].next_hop, routes[0].hops), (addr(2), 3));
}

// =============================================================================
// Maintenance
// =============================================================================

#[test]
fn test_purge_after_link_break() {
    init_test_logging();
    let mut mesh = Mesh::line(3, config(MprSelectionMode::Mpr)).unwrap();
    mesh.beacon_round().unwrap();
    mesh.beacon_round().unwrap();
    mesh.offer_service(addr(3), SERVICE).unwrap();
    mesh.advertise(addr(3)).unwrap();
    assert!(mesh.node(addr(1)).unwrap().routing.has_routes_to_service(SERVICE));
    assert_eq!(mesh.node(addr(2)).unwrap().routing.neighbour_count(), 2);

    mesh.unlink(addr(2), addr(3));
    mesh.advance(20);
    mesh.beacon_round().unwrap();
    mesh.purge(15);

    let middle = mesh.node(addr(2)).unwrap();
    assert_eq!(middle.routing.neighbour_count(), 1);
    assert!(middle.routing.monitor().neighbour(addr(3)).is_none());
    assert!(middle.routing.monitor().neighbour(addr(1)).is_some());

    // Advertised at t=0, now 20 seconds old
    assert!(!mesh.node(addr(1)).unwrap().routing.has_routes_to_service(SERVICE));
    assert_eq!(mesh.node(addr(3)).unwrap().routing.neighbour_count(), 0);
}

#[test]
fn test_statistics_track_the_send_window() {
    let mut mesh = Mesh::line(3, config(MprSelectionMode::Mpr)).unwrap();
    mesh.beacon_round().unwrap();
    mesh.beacon_round().unwrap();

    let stats = mesh.node(addr(2)).unwrap().stats.snapshot();
    assert_eq!(stats.beacons_sent, 2);
    assert_eq!(stats.advertisements_sent, 0);
    // All sends happened at the same instant
    assert_eq!(stats.overhead, 0);

    mesh.advance(10);
    mesh.beacon_round().unwrap();

    let stats = mesh.node(addr(2)).unwrap().stats.snapshot();
    assert_eq!(stats.packets_sent, 3);
    assert_eq!(stats.first_packet_at, Some(Timestamp::new(0)));
    assert_eq!(stats.last_packet_at, Some(Timestamp::new(10)));
    assert_eq!(stats.overhead, stats.bytes_sent / 10);
    assert!(stats.overhead > 0);
    assert_eq!(mesh.total_packets_sent(), 9);
}

// =============================================================================
// Facade
// =============================================================================

#[test]
fn test_facade_from_toml_advertises_offered_service() {
    let provider = TomlConfigProvider::parse(
        r#"
        [routing]
        mode = "reduced_mpr"
        max_ttl = 7
        "#,
    )
    .unwrap();
    let host = Arc::new(RecordingHost::new("edge"));
    let mut sdrp = Sdrp::from_provider(addr(11), host.clone(), &provider).unwrap();
    assert_eq!(sdrp.routing().mode(), MprSelectionMode::ReducedMpr);

    sdrp.routing_mut().offer_service(SERVICE);
    sdrp.routing_mut().send_advertisement().unwrap();

    let sent = host.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, NetworkAddress::BROADCAST);
    match Packet::decode(&sent[0].bytes).unwrap() {
        Packet::Advertisement(advertisement) => {
            assert_eq!(advertisement.source, addr(11));
            assert_eq!(advertisement.max_ttl, 7);
            assert_eq!(advertisement.sequence, 1);
            assert!(advertisement.services.contains(SERVICE));
        }
        other => panic!("expected an advertisement, got {other:?}"),
    }
}
