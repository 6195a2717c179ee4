//! Vector index trait — the persistence collaborator boundary.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

/// Parallel result arrays from a nearest-neighbor query.
///
/// Entries at the same position describe the same record, ordered by
/// ascending distance. The [`DocumentStore`](crate::store::DocumentStore)
/// assembles these into hit records.
#[derive(Debug, Clone, Default)]
pub struct IndexQueryResult {
    /// Record identifiers.
    pub ids: Vec<String>,
    /// Stored document texts.
    pub documents: Vec<String>,
    /// Stored document metadata.
    pub metadatas: Vec<HashMap<String, String>>,
    /// Vector-space distances from the query (lower = more similar).
    pub distances: Vec<f32>,
}

impl IndexQueryResult {
    /// The number of records returned.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the query returned no records.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A store of (id, vector, text, metadata) tuples with k-NN query support.
///
/// Adding a record under an existing id replaces it. Two concurrent adds of
/// the same id land in arrival order (last-write-wins); the index does not
/// serialize writers beyond its own lock.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Add records to the index. All argument vectors must have equal length.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::StoreWrite`](crate::error::RagError::StoreWrite)
    /// if the argument lengths are mismatched or the write fails.
    async fn add(
        &self,
        ids: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        documents: Vec<String>,
        metadatas: Vec<HashMap<String, String>>,
    ) -> Result<()>;

    /// Return the `n_results` records nearest to `embedding`.
    ///
    /// Returns fewer records if the index holds fewer; an empty result on an
    /// empty index is not an error.
    async fn query(&self, embedding: &[f32], n_results: usize) -> Result<IndexQueryResult>;
}
