//! # Routing Service
//!
//! `RoutingManager` wires the domain (monitor, route tables, packets) to
//! the host through the ports. It implements [`RoutingApi`](crate::ports::RoutingApi).
//!
//! ## Drop Rules for Advertisements
//!
//! In order:
//! 1. Own advertisement heard back
//! 2. Sequence number equal to, or behind within the drift tolerance of,
//!    the one on record for the source
//! 3. Hop count above the advertisement's maximum TTL
//!
//! A route to the advertised server is recorded before the sequence check,
//! so duplicates arriving through a new neighbour still add a path.

mod api;
mod broadcast;
mod core;
mod events;
mod handlers;
mod maintenance;

pub use core::RoutingManager;
