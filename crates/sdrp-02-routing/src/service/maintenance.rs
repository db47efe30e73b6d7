use tracing::debug;

use crate::service::RoutingManager;

impl RoutingManager {
    /// Age out neighbours, then routes and connections older than `max_age`.
    ///
    /// Call from the host's purge timer.
    pub(crate) fn purge_expired(&mut self, max_age: u64) {
        let now = self.now();

        let lost = self.monitor.purge(now);
        self.apply_neighbour_events(&lost);

        let routes = self.routes.purge(now, max_age);
        let connections = self.connections.purge(now, max_age);

        if !lost.is_empty() || routes > 0 || connections > 0 {
            debug!(
                neighbours = lost.len(),
                routes, connections, "purged expired state"
            );
        }
    }

    /// Neighbours unseen for longer than `max_age` are lost on the next purge.
    pub fn set_max_neighbour_age(&mut self, max_age: u64) {
        self.monitor.set_max_neighbour_age(max_age);
    }

    pub fn max_neighbour_age(&self) -> u64 {
        self.monitor.max_neighbour_age()
    }
}
