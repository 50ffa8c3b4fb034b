//! Error types for the CLI application.

use coursemap_engine::ClosureError;
use coursemap_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog or status storage error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Prerequisite closure could not be built
    #[error("{0}")]
    Closure(#[from] ClosureError<StoreError>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Course not in the catalog
    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    /// No program with this name
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
}
