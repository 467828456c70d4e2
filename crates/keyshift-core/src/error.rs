use thiserror::Error;

/// Core error type for keyshift operations.
#[derive(Error, Debug)]
pub enum KeyshiftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Migration '{description}' failed: {source}")]
    Migration {
        description: String,
        #[source]
        source: Box<KeyshiftError>,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeyshiftError {
    /// Wrap an error raised inside a custom migration.
    pub fn migration(description: impl Into<String>, source: KeyshiftError) -> Self {
        KeyshiftError::Migration {
            description: description.into(),
            source: Box::new(source),
        }
    }
}

impl From<serde_json::Error> for KeyshiftError {
    fn from(e: serde_json::Error) -> Self {
        KeyshiftError::Serialization(e.to_string())
    }
}

/// Result type alias using KeyshiftError.
pub type Result<T> = std::result::Result<T, KeyshiftError>;
