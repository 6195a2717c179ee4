//! Configuration for the retrieval stage.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Tuning parameters for context retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Maximum number of query characters taken from the input text.
    pub query_prefix_chars: usize,
    /// Number of candidates fetched from vector search (the recall stage).
    pub search_k: usize,
    /// Number of hits kept after reranking (the precision stage).
    pub final_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { query_prefix_chars: 500, search_k: 8, final_k: 3 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the maximum number of query characters.
    pub fn query_prefix_chars(mut self, chars: usize) -> Self {
        self.config.query_prefix_chars = chars;
        self
    }

    /// Set the number of vector-search candidates.
    pub fn search_k(mut self, k: usize) -> Self {
        self.config.search_k = k;
        self
    }

    /// Set the number of hits kept after reranking.
    pub fn final_k(mut self, k: usize) -> Self {
        self.config.final_k = k;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any parameter is zero or
    /// `final_k > search_k`.
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.query_prefix_chars == 0 {
            return Err(RagError::Config("query_prefix_chars must be greater than zero".into()));
        }
        if self.config.search_k == 0 || self.config.final_k == 0 {
            return Err(RagError::Config("search_k and final_k must be greater than zero".into()));
        }
        if self.config.final_k > self.config.search_k {
            return Err(RagError::Config(format!(
                "final_k ({}) must not exceed search_k ({})",
                self.config.final_k, self.config.search_k
            )));
        }
        Ok(self.config)
    }
}
