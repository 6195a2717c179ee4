//! Error types for the `finsight-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A write to the vector index failed.
    #[error("Store write error ({backend}): {message}")]
    StoreWrite {
        /// The index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A query against the vector index failed.
    #[error("Store query error ({backend}): {message}")]
    StoreQuery {
        /// The index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while scoring (query, candidate) pairs.
    #[error("Relevance scorer error ({scorer}): {message}")]
    Scorer {
        /// The scorer that produced the error.
        scorer: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
