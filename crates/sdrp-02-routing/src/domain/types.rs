//! Identifiers and time values shared across the routing domain

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a service offered by a node.
pub type ServiceId = u16;

/// 16-bit network address of a node.
///
/// `0xFFFF` is both the broadcast destination and the "unspecified"
/// address of a node that has not been configured.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NetworkAddress(u16);

impl NetworkAddress {
    /// Destination for packets delivered to every node in range.
    pub const BROADCAST: Self = Self(0xFFFF);

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw address, as inserted into Bloom filters and written on the wire.
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for NetworkAddress {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-supplied time, in whole time units (seconds in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn elapsed_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}
