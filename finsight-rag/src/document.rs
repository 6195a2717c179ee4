//! Data types for corpus documents and retrieval hits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document in the retrieval corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier within the store.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    pub metadata: HashMap<String, String>,
}

/// A [`Document`] returned by a similarity query.
///
/// `distance` comes from the vector index (lower = more similar);
/// `rerank_score` is attached by the reranking pass (higher = more
/// relevant). Hits are transient — they exist only within a single
/// retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalHit {
    /// The retrieved document.
    pub document: Document,
    /// Vector-space distance from the query.
    pub distance: f32,
    /// Pairwise relevance score, set after reranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerank_score: Option<f32>,
}
