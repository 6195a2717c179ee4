//! Document store: embeds documents and answers similarity queries.

use std::sync::Arc;

use tracing::info;

use crate::document::{Document, RetrievalHit};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// Wraps a [`VectorIndex`] with an [`EmbeddingProvider`].
///
/// Upserts embed each document's text and write (id, vector, text, metadata)
/// tuples to the index; searches embed the query, run a k-NN query, and
/// assemble [`RetrievalHit`]s in the index's returned order (ascending
/// distance).
///
/// # Example
///
/// ```rust,ignore
/// use finsight_rag::{DocumentStore, FlatIndex};
///
/// let store = DocumentStore::new(Arc::new(embedder), Arc::new(FlatIndex::in_memory()));
/// store.upsert(&documents).await?;
/// let hits = store.search("quarterly revenue", 8).await?;
/// ```
pub struct DocumentStore {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl DocumentStore {
    /// Create a store over the given embedding provider and index.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Embed and write documents to the index.
    ///
    /// Writing under an existing id replaces the stored record. Partial
    /// writes are not rolled back — write atomicity is the index's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] if embedding fails and
    /// [`RagError::StoreWrite`] if the index write fails.
    pub async fn upsert(&self, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let ids = documents.iter().map(|d| d.id.clone()).collect();
        let contents = documents.iter().map(|d| d.text.clone()).collect();
        let metadatas = documents.iter().map(|d| d.metadata.clone()).collect();
        self.index.add(ids, embeddings, contents, metadatas).await?;

        info!(document_count = documents.len(), "upserted documents");
        Ok(())
    }

    /// Return up to `top_k` hits for `query`, ordered by ascending distance.
    ///
    /// Returns fewer hits if the index holds fewer documents; an empty
    /// result on an empty index is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `top_k` is zero,
    /// [`RagError::Embedding`] if query embedding fails, and
    /// [`RagError::StoreQuery`] if the index query fails.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalHit>> {
        if top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".into()));
        }

        let query_embedding = self.embedder.embed(query).await?;
        let result = self.index.query(&query_embedding, top_k).await?;

        let hits: Vec<RetrievalHit> = result
            .ids
            .into_iter()
            .zip(result.documents)
            .zip(result.metadatas)
            .zip(result.distances)
            .map(|(((id, text), metadata), distance)| RetrievalHit {
                document: Document { id, text, metadata },
                distance,
                rerank_score: None,
            })
            .collect();

        info!(hit_count = hits.len(), "search completed");
        Ok(hits)
    }
}
