//! Tracing/logging setup shared by every binary in the workspace.

/// Logging configuration (filter, output format).
pub mod config;

/// Tracing subscriber initialization.
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(&ObservabilityConfig::from_env());
}

/// Initialize process-wide logging from an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init_with(config);
}
