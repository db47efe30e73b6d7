//! Error types for the routing subsystem

use sdrp_01_bloom_filters::FilterError;
use thiserror::Error;

/// Numeric diagnostic codes, shared with log sinks.
pub mod codes {
    pub const PACKET_TYPE: u8 = 0;
    pub const SERIALIZATION_FAILURE: u8 = 1;
    pub const DESERIALIZATION_FAILURE: u8 = 2;
    pub const FILTER_MISMATCH: u8 = 3;
    pub const FILTER_SIZE: u8 = 4;
}

/// Recoverable protocol errors. The offending packet is dropped and the
/// manager keeps processing subsequent traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unrecognized packet type {0:#04x}")]
    UnknownPacketType(u8),

    #[error("expected packet type {expected:#04x}, found {actual:#04x}")]
    WrongPacketType { expected: u8, actual: u8 },

    #[error("packet serialization failed: {0}")]
    Serialization(FilterError),

    #[error("packet deserialization failed: {0}")]
    Deserialization(FilterError),

    #[error("received an empty packet")]
    EmptyPacket,
}

impl ProtocolError {
    /// Diagnostic code for this error (see [`codes`]).
    pub fn code(&self) -> u8 {
        match self {
            Self::UnknownPacketType(_) | Self::WrongPacketType { .. } => codes::PACKET_TYPE,
            Self::Serialization(_) => codes::SERIALIZATION_FAILURE,
            Self::Deserialization(e) if e.is_size_mismatch() => codes::FILTER_MISMATCH,
            Self::Deserialization(_) | Self::EmptyPacket => codes::DESERIALIZATION_FAILURE,
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
