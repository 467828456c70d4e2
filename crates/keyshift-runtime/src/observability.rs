//! Tracing subscriber setup.

use keyshift_core::config::LoggingConfig;
use keyshift_core::error::{KeyshiftError, Result};
use tracing_subscriber::EnvFilter;

/// Build the log filter: `RUST_LOG` if set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            KeyshiftError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    };

    result.map_err(|e| KeyshiftError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_rejects_garbage_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "keyshift=verbose".to_string(),
            json: false,
        };
        assert!(matches!(env_filter(&config), Err(KeyshiftError::Config(_))));
    }

    #[test]
    fn test_env_filter_accepts_directives() {
        let config = LoggingConfig {
            level: "keyshift_runtime=debug,info".to_string(),
            json: false,
        };
        assert!(env_filter(&config).is_ok());
    }
}
