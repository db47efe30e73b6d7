//! # SDRP-02 Routing
//!
//! Service discovery routing for mobile ad-hoc networks. Nodes learn their
//! 1-hop neighbourhood from beacons, pick a subset of neighbours as
//! multipoint relays (MPRs), and flood service advertisements through those
//! relays only. Every node that hears an advertisement records a route to
//! the advertising server.
//!
//! ## Architecture
//!
//! - **Domain Layer:** packets, MPR calculators, local area monitor, route tables
//! - **Ports Layer:** `RoutingApi` (driving); `HostDelegate`, `Diagnostics`,
//!   `ConfigProvider` (driven)
//! - **Service Layer:** `RoutingManager`, the per-node state machine
//! - **Adapters Layer:** tracing diagnostics, packet statistics, config
//!   providers, the `Sdrp` facade
//!
//! ## Execution Model
//!
//! Single-threaded and host-driven. The host calls `handle_packet` on
//! receive, and `send_beacon`, `send_advertisement` and `purge` from its
//! own timers. Nothing blocks and nothing runs in the background.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sdrp_02_routing::{NetworkAddress, RoutingApi, RoutingConfig, Sdrp};
//!
//! let mut sdrp = Sdrp::new(NetworkAddress::new(1), Arc::new(host), RoutingConfig::default())?;
//! sdrp.routing_mut().offer_service(42);
//!
//! // Timer ticks
//! sdrp.routing_mut().send_beacon()?;
//! sdrp.routing_mut().send_advertisement()?;
//!
//! // On receive
//! sdrp.routing_mut().handle_packet(from, &bytes)?;
//!
//! for route in sdrp.routing().routes_to_service(42) {
//!     println!("service 42 at {} via {} ({} hops)", route.server, route.next_hop, route.hops);
//! }
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test doubles (ManualClock, RecordingHost, RecordingDiagnostics)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    calculator_for, encode_packet, Beacon, ConfigError, FloodingCalculator,
    GreedyCoverCalculator, ListenerId, LocalAreaMonitor, MprCalculator, MprSelectionMode,
    NeighbourEvent, NeighbourListener, NeighbourTable, NetworkAddress, Node, Packet, PacketType,
    ProtocolError, ReducedMprCalculator, Route, RouteTable, RoutingConfig, ServiceAdvertisement,
    ServiceId, Timestamp,
};

// Port traits
pub use ports::{ConfigProvider, Diagnostics, DropReason, HostDelegate, RoutingApi};

// Service
pub use service::RoutingManager;

// Adapters
pub use adapters::{
    NoOpDiagnostics, Sdrp, StaticConfigProvider, Statistics, StatisticsSnapshot,
    TracingDiagnostics,
};

#[cfg(feature = "toml-config")]
pub use adapters::TomlConfigProvider;

pub use sdrp_01_bloom_filters::CountingBloomFilter;
