//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the routing API a host application calls
//! - **Driven Ports (Outbound):** what the routing core needs from its host
//!   (transport and clock, diagnostics sink, configuration source)

pub mod inbound;
pub mod outbound;

pub use inbound::RoutingApi;
pub use outbound::{ConfigProvider, Diagnostics, DropReason, HostDelegate};
