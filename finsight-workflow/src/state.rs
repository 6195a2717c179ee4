//! The state record threaded through a pipeline run.

use std::path::PathBuf;

use finsight_rag::RetrievalHit;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// The mutable record one end-to-end run threads through every stage.
///
/// Each stage fills exactly one output field. Once `error` is set the state
/// is frozen: every later stage observes it and passes the state through
/// unchanged — the absorbing failure behavior lives in the stage guards,
/// not in the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PipelineState {
    /// Path of the input PDF. Immutable for the whole run.
    pub pdf_path: PathBuf,
    /// Set by the parse stage.
    pub extracted_text: Option<String>,
    /// Set by the retrieval stage. May be an empty list — that is valid
    /// context, not a failure.
    pub retrieved_context: Option<Vec<RetrievalHit>>,
    /// Set by the analysis stage.
    pub metrics: Option<Value>,
    /// Set by the report stage.
    pub report: Option<String>,
    /// Set by whichever stage failed first; absorbing.
    pub error: Option<String>,
}

impl PipelineState {
    /// Create the initial state for a run over `pdf_path`.
    pub fn new(pdf_path: impl Into<PathBuf>) -> Self {
        Self { pdf_path: pdf_path.into(), ..Self::default() }
    }

    /// Whether a stage has already failed.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Record a stage failure and log it.
    pub(crate) fn fail(&mut self, stage: &str, cause: impl std::fmt::Display) {
        let message = format!("{stage} failed: {cause}");
        error!("{message}");
        self.error = Some(message);
    }

    /// Whether the parse stage produced usable text.
    pub(crate) fn has_text(&self) -> bool {
        self.extracted_text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether the analysis stage produced a non-empty metrics object.
    ///
    /// An error-flagged metrics object still counts: the report stage is
    /// expected to narrate upstream extraction failures.
    pub(crate) fn has_metrics(&self) -> bool {
        match &self.metrics {
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }
}
