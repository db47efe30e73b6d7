//! # SDRP Telemetry
//!
//! Logging setup shared by SDRP hosts, simulators and tests.
//!
//! The protocol crates only emit `tracing` events; this crate installs
//! the subscriber that renders them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sdrp_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), sdrp_telemetry::TelemetryError> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SDRP_SERVICE_NAME` | `sdrp` | Service name in records |
//! | `SDRP_NODE_NAME` | `node` | Node name in records |
//! | `SDRP_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `SDRP_CONSOLE_OUTPUT` | `true` | Write records to stdout |
//! | `SDRP_JSON_LOGS` | `false` | JSON instead of plain lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for tests, ignoring a subscriber that is already set.
pub fn init_test_logging() {
    let config = TelemetryConfig {
        log_level: "debug".to_string(),
        ..TelemetryConfig::default()
    };
    if let Ok(filter) = env_filter(&config) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// Span for one node's activity.
///
/// # Example
///
/// ```rust,ignore
/// let _span = sdrp_telemetry::node_span!("n4", mode = "mpr");
/// ```
#[macro_export]
macro_rules! node_span {
    ($node:expr $(, $($field:tt)*)?) => {
        tracing::info_span!("node", node = %$node $(, $($field)*)?)
    };
}
