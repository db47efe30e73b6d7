use std::sync::Arc;

use crate::domain::{ConfigError, NetworkAddress, Node, RoutingConfig};
use crate::ports::{ConfigProvider, Diagnostics, HostDelegate};
use crate::service::RoutingManager;

/// Entry point for a host embedding one protocol instance.
///
/// Builds the local node from the configuration and owns the routing
/// manager that drives it.
#[derive(Debug)]
pub struct Sdrp {
    routing: RoutingManager,
}

impl Sdrp {
    /// Fails with [`ConfigError::Invalid`] when `config` does not validate.
    pub fn new(
        address: NetworkAddress,
        host: Arc<dyn HostDelegate>,
        config: RoutingConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let local = Node::local(address, &config);
        Ok(Self {
            routing: RoutingManager::new(local, host, config),
        })
    }

    /// Build from whatever `provider` supplies.
    pub fn from_provider(
        address: NetworkAddress,
        host: Arc<dyn HostDelegate>,
        provider: &dyn ConfigProvider,
    ) -> Result<Self, ConfigError> {
        Self::new(address, host, provider.routing_config())
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.routing = self.routing.with_diagnostics(diagnostics);
        self
    }

    pub fn local_node(&self) -> &Node {
        self.routing.local_node()
    }

    pub fn routing(&self) -> &RoutingManager {
        &self.routing
    }

    pub fn routing_mut(&mut self) -> &mut RoutingManager {
        &mut self.routing
    }
}
