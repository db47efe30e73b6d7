//! Tunable protocol constants

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::mpr::MprSelectionMode;

/// Routing configuration.
///
/// Every field has a protocol default; a TOML file only needs to name
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// TTL stamped into self-originated advertisements.
    pub max_ttl: u8,
    /// Backward window within which an older sequence number is a duplicate.
    pub sequence_drift_tolerance: u8,
    /// Neighbours unseen for longer than this are purged.
    pub max_neighbour_age_secs: u64,
    /// Serialization buffer size in bytes.
    pub packet_size: usize,
    /// Initial relay selection strategy.
    pub mode: MprSelectionMode,
    /// Default filter sizing `n`.
    pub predicted_element_count: usize,
    /// Default filter sizing `p`.
    pub false_positive_rate: f64,
    /// Sizing `n` of the local services filter.
    pub service_filter_capacity: usize,
}

impl RoutingConfig {
    pub const DEFAULT_MAX_TTL: u8 = 20;
    pub const DEFAULT_SEQUENCE_DRIFT_TOLERANCE: u8 = 150;
    pub const DEFAULT_MAX_NEIGHBOUR_AGE_SECS: u64 = 15;
    pub const DEFAULT_PACKET_SIZE: usize = 1024;
    pub const DEFAULT_SERVICE_FILTER_CAPACITY: usize = 5;

    /// Reject values the protocol cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ttl == 0 {
            return Err(ConfigError::Invalid("max_ttl must be positive".into()));
        }
        if self.packet_size == 0 {
            return Err(ConfigError::Invalid("packet_size must be positive".into()));
        }
        if self.predicted_element_count == 0 {
            return Err(ConfigError::Invalid(
                "predicted_element_count must be positive".into(),
            ));
        }
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "false_positive_rate must be in (0, 1), got {}",
                self.false_positive_rate
            )));
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_ttl: Self::DEFAULT_MAX_TTL,
            sequence_drift_tolerance: Self::DEFAULT_SEQUENCE_DRIFT_TOLERANCE,
            max_neighbour_age_secs: Self::DEFAULT_MAX_NEIGHBOUR_AGE_SECS,
            packet_size: Self::DEFAULT_PACKET_SIZE,
            mode: MprSelectionMode::default(),
            predicted_element_count: sdrp_01_bloom_filters::DEFAULT_PREDICTED_ELEMENT_COUNT,
            false_positive_rate: sdrp_01_bloom_filters::DEFAULT_FALSE_POSITIVE_RATE,
            service_filter_capacity: Self::DEFAULT_SERVICE_FILTER_CAPACITY,
        }
    }
}
