use tracing::{debug, trace, warn};

use crate::domain::{NetworkAddress, PacketType, ProtocolError, Timestamp};
use crate::ports::{Diagnostics, DropReason};

/// Forwards diagnostics to `tracing`, tagged with the host name.
#[derive(Debug, Clone)]
pub struct TracingDiagnostics {
    node: String,
}

impl TracingDiagnostics {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }

    pub fn node(&self) -> &str {
        &self.node
    }
}

impl Diagnostics for TracingDiagnostics {
    fn packet_sent(&self, packet_type: PacketType, size: usize, at: Timestamp) {
        trace!(node = %self.node, ?packet_type, size, at = at.as_secs(), "packet sent");
    }

    fn packet_dropped(&self, source: NetworkAddress, reason: DropReason) {
        debug!(node = %self.node, %source, %reason, "advertisement dropped");
    }

    fn protocol_error(&self, error: &ProtocolError) {
        warn!(node = %self.node, code = error.code(), %error, "protocol error");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpDiagnostics;

impl Diagnostics for NoOpDiagnostics {
    fn packet_sent(&self, _: PacketType, _: usize, _: Timestamp) {}

    fn protocol_error(&self, _: &ProtocolError) {}
}
