/// Structured error types for samplereg-core.
///
/// Request failures have their own type (`client::ApiError`) because the
/// form turns them into notifications instead of propagating them.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for samplereg-core operations
#[derive(Error, Debug)]
pub enum SampleRegError {
    /// A field name did not match any form field
    #[error("Unknown form field '{name}'")]
    UnknownField { name: String },

    /// A numeric value was written to a text field
    #[error("Field '{field}' does not hold a number")]
    NotNumeric { field: &'static str },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Configuration value rejected
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for samplereg-core operations
pub type Result<T> = std::result::Result<T, SampleRegError>;

impl SampleRegError {
    /// Create an unknown field error
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
