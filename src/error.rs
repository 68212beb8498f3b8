//! Error types for lexlight
//!
//! Only construction and configuration can fail. Highlighting itself
//! degrades to a no-op instead of returning errors.

use thiserror::Error;

/// Result type alias for lexlight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Construction and configuration errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern for rule '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
