//! # Route Table
//!
//! Unordered store of [`Route`]s with upsert-by-key semantics. Lookups
//! return routes best-first (fewest hops).

use tracing::debug;

use super::route::Route;
use super::types::{NetworkAddress, ServiceId, Timestamp};

/// Service ids probed when rendering a route's services for logs.
const LOGGED_SERVICE_RANGE: std::ops::Range<ServiceId> = 0..10;

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Insert `route`, replacing any route with the same `(server, next_hop)`.
    pub fn add(&mut self, route: Route) {
        if let Some(existing) = self.routes.iter_mut().find(|r| r.same_path(&route)) {
            *existing = route;
            return;
        }

        debug!(
            server = %route.server,
            next_hop = %route.next_hop,
            hops = route.hops,
            services = %describe_services(&route),
            "new route"
        );
        self.routes.push(route);
    }

    /// Drop routes recorded more than `max_age` before `now`.
    pub fn purge(&mut self, now: Timestamp, max_age: u64) -> usize {
        let before = self.routes.len();
        self.routes
            .retain(|route| now.elapsed_since(route.recorded_at) <= max_age);
        before - self.routes.len()
    }

    pub fn has_routes_to_service(&self, service: ServiceId) -> bool {
        self.routes.iter().any(|r| r.services.contains(service))
    }

    /// Routes whose server offers `service`, fewest hops first.
    pub fn routes_to_service(&self, service: ServiceId) -> Vec<Route> {
        let routes = best_first(self.routes.iter().filter(|r| r.services.contains(service)));

        if routes.is_empty() {
            debug!(service, known = self.routes.len(), "no route to service");
            for route in &self.routes {
                debug!(server = %route.server, services = %describe_services(route), "known route");
            }
        }
        routes
    }

    pub fn has_route_to_host(&self, host: NetworkAddress) -> bool {
        self.routes.iter().any(|r| r.server == host)
    }

    /// Routes whose server is `host`, fewest hops first.
    pub fn routes_to_host(&self, host: NetworkAddress) -> Vec<Route> {
        best_first(self.routes.iter().filter(|r| r.server == host))
    }

    /// Whether another server already offers every service of `candidate`
    /// in fewer hops.
    pub fn have_superior_route(&self, candidate: &Route) -> bool {
        self.routes.iter().any(|r| {
            r.server != candidate.server
                && r.services.contains_filter(&candidate.services)
                && r.hops < candidate.hops
        })
    }
}

fn best_first<'a>(routes: impl Iterator<Item = &'a Route>) -> Vec<Route> {
    let mut routes: Vec<Route> = routes.cloned().collect();
    routes.sort_by_key(|r| r.hops);
    routes
}

fn describe_services(route: &Route) -> String {
    LOGGED_SERVICE_RANGE
        .filter(|&s| route.services.contains(s))
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
