//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application implements for the routing core.

use std::fmt;

use crate::domain::{NetworkAddress, PacketType, ProtocolError, RoutingConfig, Timestamp};

/// Transport and clock provided by the host.
///
/// Calls are synchronous. Implementations must not call back into the
/// routing manager from `send`.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct UdpHost {
///     socket: std::net::UdpSocket,
///     started: std::time::Instant,
/// }
///
/// impl HostDelegate for UdpHost {
///     fn send(&self, packet: &[u8], destination: NetworkAddress) {
///         let _ = self.socket.send_to(packet, resolve(destination));
///     }
///
///     fn time(&self) -> Timestamp {
///         Timestamp::new(self.started.elapsed().as_secs())
///     }
///
///     fn name(&self) -> String {
///         "udp-host".into()
///     }
/// }
/// ```
pub trait HostDelegate: Send + Sync {
    /// Deliver `packet` to `destination`, or to every 1-hop neighbour
    /// when it is [`NetworkAddress::BROADCAST`].
    fn send(&self, packet: &[u8], destination: NetworkAddress);

    /// Current time. Must not go backwards.
    fn time(&self) -> Timestamp;

    /// Identity used to tag diagnostics.
    fn name(&self) -> String;
}

/// Why a well-formed advertisement was not processed further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// Our own advertisement relayed back to us
    OwnAdvertisement,
    /// Sequence number already seen, or behind within the drift window
    DuplicateSequence,
    /// Hop count beyond the advertisement's maximum TTL
    TtlExceeded,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::OwnAdvertisement => write!(f, "own advertisement"),
            DropReason::DuplicateSequence => write!(f, "duplicate sequence number"),
            DropReason::TtlExceeded => write!(f, "ttl exceeded"),
        }
    }
}

/// Sink for protocol diagnostics and statistics.
///
/// Injected at construction in place of process-wide loggers.
pub trait Diagnostics: Send + Sync {
    /// A packet of `size` bytes was handed to the transport at `at`.
    fn packet_sent(&self, packet_type: PacketType, size: usize, at: Timestamp);

    /// An advertisement from `source` was dropped.
    fn packet_dropped(&self, _source: NetworkAddress, _reason: DropReason) {}

    /// A recoverable protocol error occurred.
    fn protocol_error(&self, error: &ProtocolError);
}

/// Source of routing configuration.
pub trait ConfigProvider: Send + Sync {
    fn routing_config(&self) -> RoutingConfig;
}
