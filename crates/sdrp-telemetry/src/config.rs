//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every record
    pub service_name: String,

    /// Node identity, usually the host delegate's name
    pub node_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or an
    /// `EnvFilter` directive such as `sdrp_02_routing=debug`)
    pub log_level: String,

    /// Whether to write records to stdout at all
    pub console_output: bool,

    /// Whether to write JSON instead of human-readable lines
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "sdrp".to_string(),
            node_name: "node".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SDRP_SERVICE_NAME`: Service name (default: sdrp)
    /// - `SDRP_NODE_NAME`: Node name (default: node)
    /// - `SDRP_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `SDRP_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SDRP_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("SDRP_SERVICE_NAME").unwrap_or_else(|_| "sdrp".to_string()),

            node_name: env::var("SDRP_NODE_NAME").unwrap_or_else(|_| "node".to_string()),

            log_level: env::var("SDRP_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("SDRP_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v).unwrap_or(true))
                .unwrap_or(true),

            json_logs: env::var("SDRP_JSON_LOGS")
                .map(|v| parse_flag(&v).unwrap_or(false))
                .unwrap_or(false),
        }
    }

    /// Configuration for one simulated or embedded node.
    pub fn for_node(node_name: &str) -> Self {
        let mut config = Self::from_env();
        config.node_name = node_name.to_string();
        config
    }

    /// `service/node`, as attached to the root span.
    pub fn full_service_name(&self) -> String {
        format!("{}/{}", self.service_name, self.node_name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
