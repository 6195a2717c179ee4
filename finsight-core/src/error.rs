//! Error types shared across the finsight crates.

use thiserror::Error;

/// Errors produced by pipeline collaborators.
#[derive(Debug, Error)]
pub enum FinsightError {
    /// An input file does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Text extraction from a source document failed.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A text-completion call failed.
    #[error("Completion error ({provider}): {message}")]
    Completion {
        /// The completion provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for core operations.
pub type Result<T> = std::result::Result<T, FinsightError>;
