//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
///
/// Every variant is fatal to the operation that produced it; nothing is
/// caught or retried inside the crate. A resolution failure aborts the whole
/// pass before any value becomes readable.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required field has no entry in the backing source
    #[error("missing required config value: {key}")]
    MissingRequired { key: String },

    /// A raw value is present but cannot be converted to the declared type
    #[error("cannot cast {key}={raw:?} to {target}")]
    Cast {
        key: String,
        raw: String,
        target: &'static str,
    },

    /// Configuration file missing or unreadable
    #[error("config file not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Serialization error when exporting a resolved configuration
    #[error("failed to export config: {0}")]
    Export(String),

    /// Validation hook failure
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Shorthand for a validation failure with a human-readable reason
    pub fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation(message.into())
    }
}
