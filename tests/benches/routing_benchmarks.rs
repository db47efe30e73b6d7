//! # SDRP Routing Benchmarks
//!
//! | Group | What is measured |
//! |-------|------------------|
//! | `bloom` | Counting filter insert, query and set operations |
//! | `mpr` | Relay selection over growing neighbour tables |
//! | `packets` | Advertisement encode and decode |
//! | `mesh` | One flooded advertisement across a simulated mesh |

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdrp_01_bloom_filters::CountingBloomFilter;
use sdrp_02_routing::{
    encode_packet, GreedyCoverCalculator, MprCalculator, MprSelectionMode, NeighbourTable,
    NetworkAddress, Node, Packet, ReducedMprCalculator, RoutingConfig, ServiceAdvertisement,
    Timestamp,
};
use sdrp_tests::Mesh;

/// A neighbour table of `count` nodes, each reporting `degree` random neighbours.
fn random_neighbourhood(count: u16, degree: usize, seed: u64) -> NeighbourTable {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count)
        .map(|raw| {
            let mut neighbours = CountingBloomFilter::with_capacity(30, 0.1);
            for _ in 0..degree {
                neighbours.insert(rng.gen_range(1..=500));
            }
            let address = NetworkAddress::new(raw);
            (address, Node::sighting(address, neighbours, Timestamp::new(0)))
        })
        .collect()
}

// ============================================================================
// Counting Bloom filter
// ============================================================================

fn bench_bloom(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom");

    for n in [10usize, 30, 100] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("insert", n), &n, |b, &n| {
            b.iter(|| {
                let mut filter = CountingBloomFilter::with_capacity(n, 0.1);
                for id in 0..n as u16 {
                    filter.insert(black_box(id));
                }
                filter
            })
        });
    }

    let mut filter = CountingBloomFilter::with_capacity(30, 0.1);
    (0..30u16).for_each(|id| filter.insert(id));
    group.bench_function("contains", |b| {
        b.iter(|| (0..60u16).filter(|&id| filter.contains(black_box(id))).count())
    });

    let mut other = CountingBloomFilter::with_capacity(30, 0.1);
    (15..45u16).for_each(|id| other.insert(id));
    group.bench_function("union", |b| {
        b.iter(|| {
            let mut merged = filter.clone();
            merged.union(black_box(&other)).map(|()| merged)
        })
    });
    group.bench_function("difference", |b| {
        b.iter(|| filter.difference(black_box(&other)))
    });

    group.finish();
}

// ============================================================================
// MPR selection
// ============================================================================

fn bench_mpr(c: &mut Criterion) {
    let mut group = c.benchmark_group("mpr");
    group.measurement_time(Duration::from_secs(5));

    let reduced = ReducedMprCalculator::new(NetworkAddress::new(1000));
    for count in [5u16, 20, 50] {
        let table = random_neighbourhood(count, 8, u64::from(count));

        group.bench_with_input(BenchmarkId::new("greedy", count), &table, |b, table| {
            b.iter(|| GreedyCoverCalculator.calculate(black_box(table)))
        });
        group.bench_with_input(BenchmarkId::new("reduced", count), &table, |b, table| {
            b.iter(|| reduced.calculate(black_box(table)))
        });
    }

    group.finish();
}

// ============================================================================
// Packets
// ============================================================================

fn bench_packets(c: &mut Criterion) {
    let mut group = c.benchmark_group("packets");

    let mut services = CountingBloomFilter::with_capacity(5, 0.1);
    services.insert(42);
    let mut destinations = CountingBloomFilter::with_capacity(4, 0.1);
    destinations.insert(7);
    let advertisement = ServiceAdvertisement::new(
        NetworkAddress::new(1),
        destinations,
        services,
        CountingBloomFilter::with_capacity(30, 0.1),
        9,
        20,
    );

    group.bench_function("encode_advertisement", |b| {
        b.iter(|| encode_packet(black_box(&advertisement), 1024))
    });

    if let Ok(bytes) = encode_packet(&advertisement, 1024) {
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function("decode_advertisement", |b| {
            b.iter(|| Packet::decode(black_box(&bytes)))
        });
    }

    group.finish();
}

// ============================================================================
// Mesh
// ============================================================================

fn bench_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh");
    group.sample_size(20);

    let config = RoutingConfig {
        mode: MprSelectionMode::Flooding,
        ..RoutingConfig::default()
    };
    for count in [10u16, 40] {
        group.bench_with_input(BenchmarkId::new("flood_once", count), &count, |b, &count| {
            b.iter(|| {
                let mut mesh =
                    Mesh::random_connected(count, usize::from(count), 11, config.clone())?;
                mesh.offer_service(NetworkAddress::new(1), 42)?;
                mesh.advertise(NetworkAddress::new(1))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bloom, bench_mpr, bench_packets, bench_mesh);
criterion_main!(benches);
