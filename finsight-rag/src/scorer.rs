//! Pairwise relevance scoring for rerank passes.
//!
//! Cross-encoders process the query and candidate jointly, producing more
//! accurate relevance than embedding similarity alone — at a cost linear in
//! the number of candidates, which is why scoring is only ever applied to a
//! search shortlist.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{RagError, Result};

/// Scores (query, candidate) text pairs; higher = more relevant.
///
/// Each candidate is scored independently — no cross-candidate
/// normalization.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    /// The scorer name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Score each candidate against the query.
    ///
    /// Returns one score per candidate, in input order.
    async fn score(&self, query: &str, candidates: &[&str]) -> Result<Vec<f32>>;
}

/// A lexical scorer: the fraction of query terms found in the candidate.
///
/// Terms shorter than four characters are ignored, matching is
/// case-insensitive. A cheap stand-in when no cross-encoder is deployed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermOverlapScorer;

#[async_trait]
impl RelevanceScorer for TermOverlapScorer {
    fn name(&self) -> &str {
        "TermOverlap"
    }

    async fn score(&self, query: &str, candidates: &[&str]) -> Result<Vec<f32>> {
        let terms: Vec<String> =
            query.split_whitespace().filter(|w| w.len() > 3).map(|w| w.to_lowercase()).collect();

        let scores = candidates
            .iter()
            .map(|candidate| {
                if terms.is_empty() {
                    return 0.0;
                }
                let text = candidate.to_lowercase();
                let hits = terms.iter().filter(|t| text.contains(t.as_str())).count();
                hits as f32 / terms.len() as f32
            })
            .collect();
        Ok(scores)
    }
}

/// A scorer that delegates to a cross-encoder sidecar over HTTP.
///
/// The sidecar exposes a `POST /rerank` endpoint taking
/// `{"query": …, "documents": […]}` and returning `{"scores": […]}`.
pub struct HttpRelevanceScorer {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    documents: &'a [&'a str],
}

#[derive(Deserialize)]
struct RerankResponse {
    scores: Vec<f32>,
}

impl HttpRelevanceScorer {
    /// Create a scorer targeting the sidecar at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/rerank", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RelevanceScorer for HttpRelevanceScorer {
    fn name(&self) -> &str {
        "HttpSidecar"
    }

    async fn score(&self, query: &str, candidates: &[&str]) -> Result<Vec<f32>> {
        let request = RerankRequest { query, documents: candidates };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(scorer = self.name(), error = %e, "request failed");
                RagError::Scorer {
                    scorer: self.name().into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(scorer = self.name(), %status, "sidecar error");
            return Err(RagError::Scorer {
                scorer: self.name().into(),
                message: format!("sidecar returned {status}"),
            });
        }

        let parsed: RerankResponse = response.json().await.map_err(|e| RagError::Scorer {
            scorer: self.name().into(),
            message: format!("failed to parse response: {e}"),
        })?;

        if parsed.scores.len() != candidates.len() {
            return Err(RagError::Scorer {
                scorer: self.name().into(),
                message: format!(
                    "expected {} scores, got {}",
                    candidates.len(),
                    parsed.scores.len()
                ),
            });
        }
        Ok(parsed.scores)
    }
}
