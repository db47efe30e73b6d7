//! Packet statistics
//!
//! A [`Diagnostics`] sink that counts traffic. Share it through an `Arc`
//! to read a [`StatisticsSnapshot`] while the routing manager runs.
//!
//! ```ignore
//! let stats = Arc::new(Statistics::new());
//! let routing = RoutingManager::new(local, host, config).with_diagnostics(stats.clone());
//! // ...
//! println!("overhead: {} bytes/s", stats.snapshot().overhead);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{NetworkAddress, PacketType, ProtocolError, Timestamp};
use crate::ports::{Diagnostics, DropReason};

/// Sentinel for "no packet sent yet".
const UNSET: u64 = u64::MAX;

pub struct Statistics {
    /// Packets handed to the transport
    pub packets_sent: AtomicU64,
    /// Bytes handed to the transport
    pub bytes_sent: AtomicU64,
    pub beacons_sent: AtomicU64,
    pub advertisements_sent: AtomicU64,
    /// Advertisements dropped by the duplicate, own-packet or TTL rules
    pub packets_dropped: AtomicU64,
    pub protocol_errors: AtomicU64,
    first_packet_at: AtomicU64,
    last_packet_at: AtomicU64,
    forward: Option<Arc<dyn Diagnostics>>,
}

impl Statistics {
    pub fn new() -> Self {
        Self {
            packets_sent: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            beacons_sent: AtomicU64::new(0),
            advertisements_sent: AtomicU64::new(0),
            packets_dropped: AtomicU64::new(0),
            protocol_errors: AtomicU64::new(0),
            first_packet_at: AtomicU64::new(UNSET),
            last_packet_at: AtomicU64::new(UNSET),
            forward: None,
        }
    }

    /// Also pass every event on to `inner`.
    #[must_use]
    pub fn with_forward(mut self, inner: Arc<dyn Diagnostics>) -> Self {
        self.forward = Some(inner);
        self
    }

    /// Bytes sent per time unit between the first and the last packet.
    ///
    /// Zero until packets have been sent at two distinct times.
    pub fn overhead(&self) -> u64 {
        let first = self.first_packet_at.load(Ordering::Relaxed);
        let last = self.last_packet_at.load(Ordering::Relaxed);
        if first == UNSET || last <= first {
            return 0;
        }
        self.bytes_sent.load(Ordering::Relaxed) / (last - first)
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        let time = |value: &AtomicU64| match value.load(Ordering::Relaxed) {
            UNSET => None,
            secs => Some(Timestamp::new(secs)),
        };

        StatisticsSnapshot {
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            beacons_sent: self.beacons_sent.load(Ordering::Relaxed),
            advertisements_sent: self.advertisements_sent.load(Ordering::Relaxed),
            packets_dropped: self.packets_dropped.load(Ordering::Relaxed),
            protocol_errors: self.protocol_errors.load(Ordering::Relaxed),
            first_packet_at: time(&self.first_packet_at),
            last_packet_at: time(&self.last_packet_at),
            overhead: self.overhead(),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.packets_sent,
            &self.bytes_sent,
            &self.beacons_sent,
            &self.advertisements_sent,
            &self.packets_dropped,
            &self.protocol_errors,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.first_packet_at.store(UNSET, Ordering::Relaxed);
        self.last_packet_at.store(UNSET, Ordering::Relaxed);
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statistics")
            .field("snapshot", &self.snapshot())
            .field("forwarding", &self.forward.is_some())
            .finish()
    }
}

impl Diagnostics for Statistics {
    fn packet_sent(&self, packet_type: PacketType, size: usize, at: Timestamp) {
        let _ = self.first_packet_at.compare_exchange(
            UNSET,
            at.as_secs(),
            Ordering::Relaxed,
            Ordering::Relaxed,
        );
        self.last_packet_at.store(at.as_secs(), Ordering::Relaxed);
        self.packets_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(size as u64, Ordering::Relaxed);
        match packet_type {
            PacketType::Beacon => self.beacons_sent.fetch_add(1, Ordering::Relaxed),
            PacketType::ServiceAdvertisement => {
                self.advertisements_sent.fetch_add(1, Ordering::Relaxed)
            }
        };

        if let Some(inner) = &self.forward {
            inner.packet_sent(packet_type, size, at);
        }
    }

    fn packet_dropped(&self, source: NetworkAddress, reason: DropReason) {
        self.packets_dropped.fetch_add(1, Ordering::Relaxed);
        if let Some(inner) = &self.forward {
            inner.packet_dropped(source, reason);
        }
    }

    fn protocol_error(&self, error: &ProtocolError) {
        self.protocol_errors.fetch_add(1, Ordering::Relaxed);
        if let Some(inner) = &self.forward {
            inner.protocol_error(error);
        }
    }
}

/// Point-in-time statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub packets_sent: u64,
    pub bytes_sent: u64,
    pub beacons_sent: u64,
    pub advertisements_sent: u64,
    pub packets_dropped: u64,
    pub protocol_errors: u64,
    pub first_packet_at: Option<Timestamp>,
    pub last_packet_at: Option<Timestamp>,
    /// Bytes per time unit
    pub overhead: u64,
}
