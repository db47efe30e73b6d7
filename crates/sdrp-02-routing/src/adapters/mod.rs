//! Adapters: concrete implementations of the driven ports, plus the facade.

mod config;
mod diagnostics;
mod facade;
mod statistics;

pub use config::StaticConfigProvider;
#[cfg(feature = "toml-config")]
pub use config::TomlConfigProvider;
pub use diagnostics::{NoOpDiagnostics, TracingDiagnostics};
pub use facade::Sdrp;
pub use statistics::{Statistics, StatisticsSnapshot};
