//! Error types for Khanak

use thiserror::Error;

/// Errors surfaced by the crate.
#[derive(Error, Debug)]
pub enum KhanakError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for KhanakError {
    fn from(e: toml::de::Error) -> Self {
        KhanakError::Config(e.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KhanakError>;
