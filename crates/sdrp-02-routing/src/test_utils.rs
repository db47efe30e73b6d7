//! Test doubles for the driven ports.
//!
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use sdrp_02_routing::test_utils::RecordingHost;
//! use sdrp_02_routing::{HostDelegate, NetworkAddress};
//!
//! let host = RecordingHost::new("node-1");
//! host.clock().set(30);
//! host.send(&[0x00], NetworkAddress::BROADCAST);
//!
//! assert_eq!(host.time().as_secs(), 30);
//! assert_eq!(host.sent().len(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::domain::{NetworkAddress, PacketType, ProtocolError, Timestamp};
use crate::ports::{Diagnostics, DropReason, HostDelegate};

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    pub fn new(secs: u64) -> Self {
        Self {
            secs: AtomicU64::new(secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }

    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

/// A packet captured by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPacket {
    pub bytes: Vec<u8>,
    pub destination: NetworkAddress,
}

/// Host that records every packet instead of transmitting it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    name: String,
    clock: ManualClock,
    sent: Mutex<Vec<SentPacket>>,
}

impl RecordingHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clock: ManualClock::default(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn sent(&self) -> Vec<SentPacket> {
        self.sent.lock().clone()
    }

    /// Drain the captured packets.
    pub fn take_sent(&self) -> Vec<SentPacket> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl HostDelegate for RecordingHost {
    fn send(&self, packet: &[u8], destination: NetworkAddress) {
        self.sent.lock().push(SentPacket {
            bytes: packet.to_vec(),
            destination,
        });
    }

    fn time(&self) -> Timestamp {
        self.clock.now()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// An event captured by [`RecordingDiagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Sent {
        packet_type: PacketType,
        size: usize,
        at: Timestamp,
    },
    Dropped {
        source: NetworkAddress,
        reason: DropReason,
    },
    Error(ProtocolError),
}

/// Diagnostics sink that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().clone()
    }

    pub fn drops(&self) -> Vec<DropReason> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Dropped { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ProtocolError> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Error(error) => Some(error.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn packet_sent(&self, packet_type: PacketType, size: usize, at: Timestamp) {
        self.events.lock().push(DiagnosticEvent::Sent {
            packet_type,
            size,
            at,
        });
    }

    fn packet_dropped(&self, source: NetworkAddress, reason: DropReason) {
        self.events
            .lock()
            .push(DiagnosticEvent::Dropped { source, reason });
    }

    fn protocol_error(&self, error: &ProtocolError) {
        self.events.lock().push(DiagnosticEvent::Error(error.clone()));
    }
}
