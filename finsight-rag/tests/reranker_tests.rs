//! Contract tests for the reranking pass.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use finsight_rag::document::{Document, RetrievalHit};
use finsight_rag::error::RagError;
use finsight_rag::reranker::Reranker;
use finsight_rag::scorer::RelevanceScorer;
use proptest::prelude::*;

/// Returns a fixed score per candidate, keyed by candidate text.
struct ScriptedScorer {
    scores: HashMap<String, f32>,
    calls: AtomicUsize,
}

impl ScriptedScorer {
    fn new(scores: &[(&str, f32)]) -> Self {
        Self {
            scores: scores.iter().map(|(t, s)| (t.to_string(), *s)).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelevanceScorer for ScriptedScorer {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn score(&self, _query: &str, candidates: &[&str]) -> finsight_rag::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(candidates.iter().map(|c| self.scores.get(*c).copied().unwrap_or(0.0)).collect())
    }
}

fn make_hit(id: &str, text: &str) -> RetrievalHit {
    RetrievalHit {
        document: Document {
            id: id.to_string(),
            text: text.to_string(),
            metadata: HashMap::new(),
        },
        distance: 0.5,
        rerank_score: None,
    }
}

#[tokio::test]
async fn rerank_sorts_descending_and_truncates() {
    let scorer = Arc::new(ScriptedScorer::new(&[("low", 0.1), ("high", 0.9), ("mid", 0.5)]));
    let reranker = Reranker::new(scorer);

    let hits = vec![make_hit("a", "low"), make_hit("b", "high"), make_hit("c", "mid")];
    let reranked = reranker.rerank("q", hits, 2).await.unwrap();

    assert_eq!(reranked.len(), 2);
    assert_eq!(reranked[0].document.id, "b");
    assert_eq!(reranked[1].document.id, "c");
    assert_eq!(reranked[0].rerank_score, Some(0.9));
}

#[tokio::test]
async fn rerank_is_stable_under_equal_scores() {
    let scorer = Arc::new(ScriptedScorer::new(&[("same", 0.5)]));
    let reranker = Reranker::new(scorer);

    let hits = vec![
        make_hit("first", "same"),
        make_hit("second", "same"),
        make_hit("third", "same"),
    ];
    let reranked = reranker.rerank("q", hits, 3).await.unwrap();

    let order: Vec<&str> = reranked.iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(order, ["first", "second", "third"]);
}

#[tokio::test]
async fn rerank_empty_candidates_skips_scorer() {
    let scorer = Arc::new(ScriptedScorer::new(&[]));
    let reranker = Reranker::new(Arc::clone(&scorer) as Arc<dyn RelevanceScorer>);

    let reranked = reranker.rerank("q", Vec::new(), 5).await.unwrap();

    assert!(reranked.is_empty());
    assert_eq!(scorer.call_count(), 0);
}

#[tokio::test]
async fn rerank_top_k_beyond_len_returns_all_sorted() {
    let scorer = Arc::new(ScriptedScorer::new(&[("low", 0.2), ("high", 0.8)]));
    let reranker = Reranker::new(scorer);

    let hits = vec![make_hit("a", "low"), make_hit("b", "high")];
    let reranked = reranker.rerank("q", hits, 10).await.unwrap();

    assert_eq!(reranked.len(), 2);
    assert_eq!(reranked[0].document.id, "b");
}

#[tokio::test]
async fn rerank_rejects_zero_top_k() {
    let scorer = Arc::new(ScriptedScorer::new(&[]));
    let reranker = Reranker::new(scorer);

    let result = reranker.rerank("q", vec![make_hit("a", "x")], 0).await;
    assert!(matches!(result, Err(RagError::Config(_))));
}

/// A scorer returning arbitrary fixed scores positionally.
struct PositionalScorer {
    scores: Vec<f32>,
}

#[async_trait]
impl RelevanceScorer for PositionalScorer {
    fn name(&self) -> &str {
        "Positional"
    }

    async fn score(&self, _query: &str, candidates: &[&str]) -> finsight_rag::Result<Vec<f32>> {
        Ok(self.scores[..candidates.len()].to_vec())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For all non-empty candidate sequences, rerank output is sorted by
    /// descending score and has length min(top_k, len).
    #[test]
    fn rerank_output_sorted_and_bounded(
        scores in proptest::collection::vec(0.0f32..1.0f32, 1..20),
        top_k in 1usize..25,
    ) {
        let candidate_count = scores.len();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let reranked = rt.block_on(async {
            let reranker = Reranker::new(Arc::new(PositionalScorer { scores }));
            let hits: Vec<RetrievalHit> = (0..candidate_count)
                .map(|i| make_hit(&format!("id{i}"), &format!("text{i}")))
                .collect();
            reranker.rerank("q", hits, top_k).await.unwrap()
        });

        prop_assert_eq!(reranked.len(), top_k.min(candidate_count));

        for window in reranked.windows(2) {
            let (a, b) = (window[0].rerank_score.unwrap(), window[1].rerank_score.unwrap());
            prop_assert!(a >= b, "results not in descending order: {a} < {b}");
        }
    }
}
