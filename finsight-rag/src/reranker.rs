//! Second-stage reranking over a search shortlist.

use std::sync::Arc;

use tracing::info;

use crate::document::RetrievalHit;
use crate::error::{RagError, Result};
use crate::scorer::RelevanceScorer;

/// Reorders search hits by pairwise relevance to the query.
///
/// This is the precision half of a retrieve-then-rerank pattern: vector
/// search optimizes recall with cheap approximate similarity, then every
/// shortlisted candidate is scored against the query. Scorer cost is linear
/// in the candidate count, so the reranker is never run over a full corpus.
pub struct Reranker {
    scorer: Arc<dyn RelevanceScorer>,
}

impl Reranker {
    /// Create a reranker over the given scorer.
    pub fn new(scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self { scorer }
    }

    /// Score, sort, and truncate `hits` to the `top_k` most relevant.
    ///
    /// Every (query, hit text) pair is scored independently and the score
    /// attached as `rerank_score`. Hits are stably sorted by descending
    /// score — ties keep their original relative order — then truncated to
    /// `top_k`. If `top_k` exceeds the candidate count, all candidates are
    /// returned, sorted. Empty input returns empty output without invoking
    /// the scorer.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `top_k` is zero and
    /// [`RagError::Scorer`] if scoring fails or returns the wrong number of
    /// scores.
    pub async fn rerank(
        &self,
        query: &str,
        mut hits: Vec<RetrievalHit>,
        top_k: usize,
    ) -> Result<Vec<RetrievalHit>> {
        if top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".into()));
        }
        if hits.is_empty() {
            return Ok(hits);
        }

        let texts: Vec<&str> = hits.iter().map(|h| h.document.text.as_str()).collect();
        let scores = self.scorer.score(query, &texts).await?;
        if scores.len() != hits.len() {
            return Err(RagError::Scorer {
                scorer: self.scorer.name().into(),
                message: format!("expected {} scores, got {}", hits.len(), scores.len()),
            });
        }

        for (hit, score) in hits.iter_mut().zip(scores) {
            hit.rerank_score = Some(score);
        }

        // sort_by is stable: equal scores keep their search order.
        hits.sort_by(|a, b| {
            b.rerank_score.partial_cmp(&a.rerank_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        info!(scorer = self.scorer.name(), hit_count = hits.len(), "reranking complete");
        Ok(hits)
    }
}
