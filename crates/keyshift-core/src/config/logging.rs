use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (overridden by `RUST_LOG`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output JSON format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
