use sdrp_01_bloom_filters::CountingBloomFilter;

use crate::domain::{MprSelectionMode, NetworkAddress, ProtocolError, Route, ServiceId};
use crate::ports::RoutingApi;
use crate::service::RoutingManager;

impl RoutingApi for RoutingManager {
    fn handle_packet(&mut self, source: NetworkAddress, packet: &[u8]) -> Result<(), ProtocolError> {
        self.dispatch(source, packet)
    }

    fn send_beacon(&mut self) -> Result<(), ProtocolError> {
        self.broadcast_beacon()
    }

    fn send_advertisement(&mut self) -> Result<(), ProtocolError> {
        self.originate_advertisement()
    }

    fn purge(&mut self, max_age: u64) {
        self.purge_expired(max_age);
    }

    fn mode(&self) -> MprSelectionMode {
        self.monitor.mode()
    }

    fn set_mode(&mut self, mode: MprSelectionMode) {
        self.monitor.set_mode(mode);
    }

    fn routes_to_service(&self, service: ServiceId) -> Vec<Route> {
        self.routes.routes_to_service(service)
    }

    fn has_routes_to_service(&self, service: ServiceId) -> bool {
        self.routes.has_routes_to_service(service)
    }

    fn routes_to_host(&self, host: NetworkAddress) -> Vec<Route> {
        self.connections.routes_to_host(host)
    }

    fn has_routes_to_host(&self, host: NetworkAddress) -> bool {
        self.connections.has_route_to_host(host)
    }

    fn register_connection(&mut self, source: NetworkAddress, last_hop: NetworkAddress) {
        if self.routes.has_route_to_host(source) {
            return;
        }
        let now = self.now();
        self.connections.add(Route::new(
            source,
            last_hop,
            CountingBloomFilter::empty(),
            Route::MAX_HOPS,
            now,
        ));
    }

    fn expected_neighbour_count(&mut self, count: usize) {
        let mut neighbours =
            CountingBloomFilter::with_capacity(count, self.config.false_positive_rate);
        for node in self.monitor.neighbours() {
            neighbours.insert(node.address.as_u16());
        }
        self.local.neighbours = neighbours;
    }

    fn offer_service(&mut self, service: ServiceId) {
        self.local.offer_service(service);
    }

    fn withdraw_service(&mut self, service: ServiceId) {
        self.local.withdraw_service(service);
    }
}
