//! Integration tests for the document store and flat index.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use finsight_rag::document::Document;
use finsight_rag::embedding::EmbeddingProvider;
use finsight_rag::error::RagError;
use finsight_rag::flat::FlatIndex;
use finsight_rag::index::VectorIndex;
use finsight_rag::store::DocumentStore;

const DIM: usize = 64;

/// Deterministic hash-based embedder: identical text → identical vector.
struct MockEmbedder;

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> finsight_rag::Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut v = vec![0.0f32; DIM];
        for (i, x) in v.iter_mut().enumerate() {
            *x = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn make_doc(id: &str, text: &str) -> Document {
    Document {
        id: id.to_string(),
        text: text.to_string(),
        metadata: HashMap::from([("source".to_string(), "test".to_string())]),
    }
}

fn make_store(index: Arc<FlatIndex>) -> DocumentStore {
    DocumentStore::new(Arc::new(MockEmbedder), index)
}

#[tokio::test]
async fn search_on_empty_index_returns_empty() {
    let store = make_store(Arc::new(FlatIndex::in_memory()));

    let hits = store.search("anything", 5).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn search_rejects_zero_top_k() {
    let store = make_store(Arc::new(FlatIndex::in_memory()));

    let result = store.search("anything", 0).await;
    assert!(matches!(result, Err(RagError::Config(_))));
}

#[tokio::test]
async fn round_trip_exact_text_has_smallest_distance() {
    let store = make_store(Arc::new(FlatIndex::in_memory()));
    store
        .upsert(&[
            make_doc("q1", "Revenue grew twelve percent in the first quarter"),
            make_doc("q2", "Operating expenses were flat year over year"),
            make_doc("q3", "The board approved a share buyback program"),
        ])
        .await
        .unwrap();

    let hits = store.search("Operating expenses were flat year over year", 3).await.unwrap();

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].document.id, "q2");
    assert!(hits[0].distance < 1e-5, "exact match should be at distance ~0");
    for window in hits.windows(2) {
        assert!(window[0].distance <= window[1].distance);
    }
}

#[tokio::test]
async fn search_returns_fewer_hits_than_top_k_on_small_index() {
    let store = make_store(Arc::new(FlatIndex::in_memory()));
    store.upsert(&[make_doc("a", "alpha"), make_doc("b", "beta")]).await.unwrap();

    let hits = store.search("alpha", 8).await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn upsert_same_id_replaces_record() {
    let index = Arc::new(FlatIndex::in_memory());
    let store = make_store(Arc::clone(&index));

    store.upsert(&[make_doc("doc", "old text")]).await.unwrap();
    store.upsert(&[make_doc("doc", "new text")]).await.unwrap();

    assert_eq!(index.len().await, 1);
    let hits = store.search("new text", 1).await.unwrap();
    assert_eq!(hits[0].document.text, "new text");
}

#[tokio::test]
async fn hits_carry_metadata_from_upsert() {
    let store = make_store(Arc::new(FlatIndex::in_memory()));
    store.upsert(&[make_doc("m", "metadata round trip")]).await.unwrap();

    let hits = store.search("metadata round trip", 1).await.unwrap();
    assert_eq!(hits[0].document.metadata.get("source").map(String::as_str), Some("test"));
    assert!(hits[0].rerank_score.is_none());
}

#[tokio::test]
async fn flat_index_rejects_mismatched_argument_lengths() {
    let index = FlatIndex::in_memory();

    let result = index
        .add(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 0.0]],
            vec!["one".to_string()],
            vec![HashMap::new()],
        )
        .await;

    assert!(matches!(result, Err(RagError::StoreWrite { .. })));
}

#[tokio::test]
async fn flat_index_snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = make_store(Arc::new(FlatIndex::open(dir.path()).await.unwrap()));
        store
            .upsert(&[make_doc("persisted", "net income doubled"), make_doc("other", "unrelated")])
            .await
            .unwrap();
    }

    let reopened = Arc::new(FlatIndex::open(dir.path()).await.unwrap());
    assert_eq!(reopened.len().await, 2);

    let store = make_store(reopened);
    let hits = store.search("net income doubled", 1).await.unwrap();
    assert_eq!(hits[0].document.id, "persisted");
}
