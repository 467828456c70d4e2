use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the host keeps the settings being migrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Path to the JSON settings file.
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,

    /// Namespace the migrations operate under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
            namespace: default_namespace(),
        }
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("settings.json")
}

fn default_namespace() -> String {
    "linter-eslint".to_string()
}
