mod logging;
mod settings;

pub use logging::LoggingConfig;
pub use settings::SettingsConfig;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{KeyshiftError, Result};

/// Root configuration for keyshift.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyshiftConfig {
    /// Settings file and namespace.
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KeyshiftConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| KeyshiftError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Load configuration from a TOML file, or defaults if it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| KeyshiftError::Config(format!("Failed to parse config: {}", e)))
    }
}

static ENV_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
});

/// Substitute environment variables in the format ${VAR_NAME}. Unknown variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    for cap in ENV_VAR.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = KeyshiftConfig::default();
        assert_eq!(config.settings.namespace, "linter-eslint");
        assert_eq!(config.settings.path, PathBuf::from("settings.json"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = KeyshiftConfig::parse_toml("").unwrap();
        assert_eq!(config, KeyshiftConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [settings]
            path = "/home/me/.atom/config.json"
            namespace = "my-plugin"

            [logging]
            level = "debug"
            json = true
        "#;

        let config = KeyshiftConfig::parse_toml(toml).unwrap();
        assert_eq!(
            config.settings.path,
            PathBuf::from("/home/me/.atom/config.json")
        );
        assert_eq!(config.settings.namespace, "my-plugin");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = KeyshiftConfig::parse_toml("[settings\npath = 1").unwrap_err();
        assert!(matches!(err, KeyshiftError::Config(_)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KEYSHIFT_TEST_SETTINGS", "/tmp/settings.json");

        let toml = r#"
            [settings]
            path = "${KEYSHIFT_TEST_SETTINGS}"
        "#;

        let config = KeyshiftConfig::parse_toml(toml).unwrap();
        assert_eq!(config.settings.path, PathBuf::from("/tmp/settings.json"));

        std::env::remove_var("KEYSHIFT_TEST_SETTINGS");
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("keyshift.toml");
        assert_eq!(
            KeyshiftConfig::load_or_default(&missing).unwrap(),
            KeyshiftConfig::default()
        );

        std::fs::write(&missing, "[logging]\nlevel = \"warn\"\n").unwrap();
        let config = KeyshiftConfig::load_or_default(&missing).unwrap();
        assert_eq!(config.logging.level, "warn");
    }
}
