use std::collections::HashMap;
use std::sync::Arc;

use crate::adapters::TracingDiagnostics;
use crate::domain::{
    LocalAreaMonitor, NetworkAddress, Node, RouteTable, RoutingConfig, Timestamp,
};
use crate::ports::{Diagnostics, HostDelegate};

/// Routing state machine for one node.
///
/// Owns the local node, the neighbour monitor, the service route table and
/// the reverse-path (connection) table. Every call runs to completion on
/// the caller's thread.
///
/// # Example
///
/// ```rust,ignore
/// use sdrp_02_routing::{Node, NetworkAddress, RoutingConfig, RoutingManager, RoutingApi};
///
/// let config = RoutingConfig::default();
/// let local = Node::local(NetworkAddress::new(1), &config);
/// let mut routing = RoutingManager::new(local, Arc::new(host), config);
///
/// routing.offer_service(7);
/// routing.send_advertisement()?;
/// ```
pub struct RoutingManager {
    pub(crate) config: RoutingConfig,
    pub(crate) host: Arc<dyn HostDelegate>,
    pub(crate) diagnostics: Arc<dyn Diagnostics>,
    pub(crate) local: Node,
    /// Sequence number of the last self-originated advertisement
    pub(crate) sequence: u8,
    /// Last sequence number accepted per advertisement source
    pub(crate) sequence_records: HashMap<NetworkAddress, u8>,
    pub(crate) routes: RouteTable,
    pub(crate) connections: RouteTable,
    pub(crate) monitor: LocalAreaMonitor,
}

impl RoutingManager {
    /// Create a routing manager reporting through [`TracingDiagnostics`].
    ///
    /// `config` is taken as given; callers validate it first (see
    /// [`RoutingConfig::validate`]), as [`crate::Sdrp::new`] does.
    pub fn new(local: Node, host: Arc<dyn HostDelegate>, config: RoutingConfig) -> Self {
        let diagnostics: Arc<dyn Diagnostics> = Arc::new(TracingDiagnostics::new(host.name()));
        let monitor = LocalAreaMonitor::new(local.address, config.mode)
            .with_max_age(config.max_neighbour_age_secs)
            .with_false_positive_rate(config.false_positive_rate);

        Self {
            config,
            host,
            diagnostics,
            local,
            sequence: 0,
            sequence_records: HashMap::new(),
            routes: RouteTable::new(),
            connections: RouteTable::new(),
            monitor,
        }
    }

    /// Replace the diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.host.time()
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn local_node(&self) -> &Node {
        &self.local
    }

    pub fn monitor(&self) -> &LocalAreaMonitor {
        &self.monitor
    }

    pub fn neighbour_count(&self) -> usize {
        self.monitor.neighbour_count()
    }

    /// Sequence number of the last self-originated advertisement.
    pub fn sequence_number(&self) -> u8 {
        self.sequence
    }

    /// All known service routes.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// All registered reverse paths.
    pub fn connections(&self) -> &RouteTable {
        &self.connections
    }
}

impl std::fmt::Debug for RoutingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingManager")
            .field("address", &self.local.address)
            .field("mode", &self.monitor.mode())
            .field("sequence", &self.sequence)
            .field("neighbours", &self.monitor.neighbour_count())
            .field("routes", &self.routes.len())
            .field("connections", &self.connections.len())
            .finish()
    }
}
