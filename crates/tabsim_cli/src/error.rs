//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;
use tabsim_core::types::SimError;

/// Errors surfaced by `tabsim` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command-line argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Sampling or resampling failed.
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding output failed.
    #[error("Serialisation error: {0}")]
    Serialisation(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
