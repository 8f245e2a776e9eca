//! Error types for ao2pyv-core

use thiserror::Error;

/// Result type alias for ao2pyv-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ao2pyv-core
#[derive(Error, Debug)]
pub enum Error {
    /// Registry or configuration set up incorrectly
    #[error("{registry} configuration error: {message}")]
    Configuration {
        /// Registry (or config section) that is misconfigured
        registry: String,
        /// Description of the problem
        message: String,
    },

    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was given
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// No strategy registered under the requested name
    #[error("unknown {registry} strategy '{name}'")]
    UnknownStrategy {
        /// Registry that was searched
        registry: String,
        /// Name that was requested
        name: String,
    },

    /// HTTP transport failure or non-success response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A record does not have the shape a strategy expects
    #[error("data format error in field '{field}': {message}")]
    DataFormat {
        /// Offending field
        field: String,
        /// Description of the problem
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was caused by malformed or unexpected data
    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat { .. } | Self::Json(_))
    }

    pub(crate) fn data_format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataFormat {
            field: field.into(),
            message: message.into(),
        }
    }
}
