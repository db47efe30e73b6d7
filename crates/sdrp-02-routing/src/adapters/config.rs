use crate::domain::RoutingConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - In-memory config for tests and embedding
// ============================================================================

/// Configuration provider holding a fixed [`RoutingConfig`].
///
/// For file-based configuration, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: RoutingConfig,
}

impl StaticConfigProvider {
    /// Create with the protocol defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn routing_config(&self) -> RoutingConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Config file loading (requires "toml-config" feature)
// ============================================================================

#[cfg(feature = "toml-config")]
mod toml_config {
    use super::*;
    use crate::domain::{ConfigError, MprSelectionMode};
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;

    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        routing: RoutingConfigFile,
    }

    #[derive(Debug, Deserialize, Default)]
    struct RoutingConfigFile {
        max_ttl: Option<u8>,
        sequence_drift_tolerance: Option<u8>,
        max_neighbour_age_secs: Option<u64>,
        packet_size: Option<usize>,
        mode: Option<MprSelectionMode>,
        predicted_element_count: Option<usize>,
        false_positive_rate: Option<f64>,
        service_filter_capacity: Option<usize>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [routing]
    /// max_ttl = 20
    /// sequence_drift_tolerance = 150
    /// max_neighbour_age_secs = 15
    /// packet_size = 1024
    /// mode = "mpr"              # flooding | mpr | reduced_mpr
    /// predicted_element_count = 30
    /// false_positive_rate = 0.1
    /// service_filter_capacity = 5
    /// ```
    ///
    /// Missing keys take their defaults.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: RoutingConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read, parsed or validated.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let rc = file.routing;
            let defaults = RoutingConfig::default();
            let config = RoutingConfig {
                max_ttl: rc.max_ttl.unwrap_or(defaults.max_ttl),
                sequence_drift_tolerance: rc
                    .sequence_drift_tolerance
                    .unwrap_or(defaults.sequence_drift_tolerance),
                max_neighbour_age_secs: rc
                    .max_neighbour_age_secs
                    .unwrap_or(defaults.max_neighbour_age_secs),
                packet_size: rc.packet_size.unwrap_or(defaults.packet_size),
                mode: rc.mode.unwrap_or(defaults.mode),
                predicted_element_count: rc
                    .predicted_element_count
                    .unwrap_or(defaults.predicted_element_count),
                false_positive_rate: rc
                    .false_positive_rate
                    .unwrap_or(defaults.false_positive_rate),
                service_filter_capacity: rc
                    .service_filter_capacity
                    .unwrap_or(defaults.service_filter_capacity),
            };
            config.validate()?;

            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn routing_config(&self) -> RoutingConfig {
            self.config.clone()
        }
    }
}

#[cfg(feature = "toml-config")]
pub use toml_config::TomlConfigProvider;
