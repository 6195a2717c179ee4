//! Retrieval stage: vector search composed with reranking.

use std::sync::Arc;

use tracing::info;

use crate::config::RetrievalConfig;
use crate::document::RetrievalHit;
use crate::error::Result;
use crate::reranker::Reranker;
use crate::store::DocumentStore;

/// Fetches the best grounding context for a piece of text.
///
/// Composes [`DocumentStore::search`] (recall) with [`Reranker::rerank`]
/// (precision) into a single operation. Long inputs are truncated to a
/// fixed character prefix before querying — both retrieval relevance and
/// downstream context windows degrade with very long queries, so the
/// prefix cut is policy, not a limitation.
pub struct ContextRetriever {
    store: Arc<DocumentStore>,
    reranker: Reranker,
    config: RetrievalConfig,
}

impl ContextRetriever {
    /// Create a retriever over the given store and reranker.
    pub fn new(store: Arc<DocumentStore>, reranker: Reranker, config: RetrievalConfig) -> Self {
        Self { store, reranker, config }
    }

    /// Return the reranked context hits for `text`.
    ///
    /// An empty result (empty corpus, nothing similar) is valid output,
    /// never an error.
    ///
    /// # Errors
    ///
    /// Propagates search and rerank failures as
    /// [`RagError`](crate::error::RagError).
    pub async fn get_context(&self, text: &str) -> Result<Vec<RetrievalHit>> {
        let query = prefix(text, self.config.query_prefix_chars);

        let hits = self.store.search(query, self.config.search_k).await?;
        if hits.is_empty() {
            info!("no context found");
            return Ok(hits);
        }

        self.reranker.rerank(query, hits, self.config.final_k).await
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
fn prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::prefix;

    #[test]
    fn prefix_shorter_input_unchanged() {
        assert_eq!(prefix("short", 500), "short");
    }

    #[test]
    fn prefix_truncates_long_input() {
        let long = "a".repeat(600);
        assert_eq!(prefix(&long, 500).len(), 500);
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(prefix(&text, 4).chars().count(), 4);
    }
}
