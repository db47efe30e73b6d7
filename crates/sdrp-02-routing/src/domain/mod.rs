//! Domain Layer - protocol logic with no I/O
//!
//! - Addresses, timestamps and nodes
//! - Beacon and service advertisement packets
//! - MPR relay selection
//! - Local area monitoring of 1-hop neighbours
//! - Route tables for services and reverse paths

pub mod config;
pub mod errors;
pub mod monitor;
pub mod mpr;
pub mod node;
pub mod packets;
pub mod route;
pub mod route_table;
/// Core value types
pub mod types;

pub use config::RoutingConfig;
pub use errors::{codes, ConfigError, ProtocolError};
pub use monitor::{ListenerId, LocalAreaMonitor, NeighbourEvent, NeighbourListener};
pub use mpr::{
    calculator_for, FloodingCalculator, GreedyCoverCalculator, MprCalculator, MprSelectionMode,
    ReducedMprCalculator,
};
pub use node::{NeighbourTable, Node};
pub use packets::{encode_packet, Beacon, Packet, PacketType, ServiceAdvertisement};
pub use route::Route;
pub use route_table::RouteTable;
pub use types::*;
