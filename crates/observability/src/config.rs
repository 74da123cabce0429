//! Environment-driven logging configuration.

use std::env;

/// Env var holding the log filter (falls back to `RUST_LOG`).
pub const LOG_FILTER_ENV: &str = "STOCKLEDGER_LOG";

/// Env var selecting the output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "STOCKLEDGER_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, with timestamps.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl LogFormat {
    /// Parse a format name; unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive string, e.g. `info` or `stockledger_inventory=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl ObservabilityConfig {
    /// Read `STOCKLEDGER_LOG` (else `RUST_LOG`) and `STOCKLEDGER_LOG_FORMAT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or blank values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(filter) = present(LOG_FILTER_ENV).or_else(|| present("RUST_LOG")) {
            config.filter = filter;
        }
        if let Some(format) = present(LOG_FORMAT_ENV).and_then(|v| LogFormat::parse(&v)) {
            config.format = format;
        }
        config
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}
