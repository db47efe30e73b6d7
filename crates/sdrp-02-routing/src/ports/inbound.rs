//! # Driving Ports (Inbound API)
//!
//! The calls a host makes into the routing core. Hosts drive everything:
//! packet reception, beacon and advertisement timers, and purge ticks.
//! The core never schedules work on its own.

use crate::domain::{MprSelectionMode, NetworkAddress, ProtocolError, Route, ServiceId};

/// Primary API of the routing subsystem.
///
/// # Example
///
/// ```rust,ignore
/// use sdrp_02_routing::ports::RoutingApi;
///
/// fn on_receive<R: RoutingApi>(routing: &mut R, from: NetworkAddress, bytes: &[u8]) {
///     // Errors are already reported through Diagnostics
///     let _ = routing.handle_packet(from, bytes);
/// }
/// ```
pub trait RoutingApi {
    /// Decode and process a packet received from the 1-hop neighbour `source`.
    ///
    /// Malformed or unrecognized packets are dropped and reported; the
    /// error is also returned so the caller can count it.
    fn handle_packet(&mut self, source: NetworkAddress, packet: &[u8]) -> Result<(), ProtocolError>;

    /// Broadcast a beacon carrying the local neighbours filter.
    ///
    /// Only sent in [`MprSelectionMode::Mpr`]; a no-op otherwise.
    ///
    /// # Panics
    ///
    /// If the local neighbours filter has size zero, for example after
    /// `expected_neighbour_count(0)`.
    fn send_beacon(&mut self) -> Result<(), ProtocolError>;

    /// Originate an advertisement of the local services.
    ///
    /// A no-op while the node offers no service. Otherwise advances the
    /// sequence number (wrapping at 255).
    fn send_advertisement(&mut self) -> Result<(), ProtocolError>;

    /// Age out neighbours, service routes and reverse paths.
    ///
    /// Routes older than `max_age` are dropped; neighbours use the
    /// monitor's own neighbour age.
    fn purge(&mut self, max_age: u64);

    /// Active relay selection mode.
    fn mode(&self) -> MprSelectionMode;

    /// Switch relay selection mode.
    fn set_mode(&mut self, mode: MprSelectionMode);

    /// Known routes to servers offering `service`, fewest hops first.
    fn routes_to_service(&self, service: ServiceId) -> Vec<Route>;

    fn has_routes_to_service(&self, service: ServiceId) -> bool;

    /// Registered reverse paths to `host`, fewest hops first.
    fn routes_to_host(&self, host: NetworkAddress) -> Vec<Route>;

    fn has_routes_to_host(&self, host: NetworkAddress) -> bool;

    /// Remember that traffic from `source` arrived through `last_hop`.
    ///
    /// Ignored when a service route to `source` is already known.
    fn register_connection(&mut self, source: NetworkAddress, last_hop: NetworkAddress);

    /// Resize the local neighbours filter for `count` neighbours.
    fn expected_neighbour_count(&mut self, count: usize);

    /// Start advertising `service`.
    fn offer_service(&mut self, service: ServiceId);

    /// Stop advertising `service`.
    fn withdraw_service(&mut self, service: ServiceId);
}
