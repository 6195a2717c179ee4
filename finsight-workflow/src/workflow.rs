//! The pipeline orchestrator.
//!
//! Runs the four stages strictly in sequence, each a
//! `PipelineState -> PipelineState` function with an entry guard and a
//! failure boundary. The orchestrator never fails itself: the final state
//! carries either a report or an error.

use std::sync::Arc;

use finsight_agents::{AnalysisAgent, PdfExtractor, ReportAgent};
use finsight_core::{CompletionModel, FinsightError, Result};
use finsight_rag::ContextRetriever;
use tracing::info;

use crate::state::PipelineState;

/// Orchestrates parse → retrieve-context → analyze → report.
///
/// Construct one via [`Workflow::builder()`]. All collaborators are
/// shared-ownership so independent runs can execute concurrently; each run
/// owns its [`PipelineState`] exclusively.
///
/// # Example
///
/// ```rust,ignore
/// use finsight_workflow::Workflow;
///
/// let workflow = Workflow::builder()
///     .extractor(Arc::new(LopdfExtractor::new()))
///     .retriever(Arc::new(retriever))
///     .completion_model(model)
///     .build()?;
///
/// let state = workflow.run_path("reports/q3.pdf").await;
/// match state.error {
///     None => println!("{}", state.report.unwrap()),
///     Some(error) => eprintln!("{error}"),
/// }
/// ```
pub struct Workflow {
    extractor: Arc<dyn PdfExtractor>,
    retriever: Arc<ContextRetriever>,
    analyst: AnalysisAgent,
    writer: ReportAgent,
}

impl Workflow {
    /// Create a new [`WorkflowBuilder`].
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::default()
    }

    /// Run the full pipeline over an initial state.
    ///
    /// Returns the final state unconditionally; inspect
    /// [`PipelineState::error`] to distinguish success from failure.
    pub async fn run(&self, state: PipelineState) -> PipelineState {
        let state = self.parse_document(state).await;
        let state = self.retrieve_context(state).await;
        let state = self.analyze_text(state).await;
        self.generate_report(state).await
    }

    /// Run the full pipeline over a PDF path.
    pub async fn run_path(&self, pdf_path: impl Into<std::path::PathBuf>) -> PipelineState {
        self.run(PipelineState::new(pdf_path)).await
    }

    /// Stage 1: extract text from the input PDF.
    pub async fn parse_document(&self, mut state: PipelineState) -> PipelineState {
        info!("step: parse_document");
        if state.is_failed() {
            return state;
        }

        match self.extractor.extract_text(&state.pdf_path) {
            Ok(text) => state.extracted_text = Some(text),
            Err(e) => state.fail("Document parsing", e),
        }
        state
    }

    /// Stage 2: fetch reranked grounding context for the extracted text.
    pub async fn retrieve_context(&self, mut state: PipelineState) -> PipelineState {
        info!("step: retrieve_context");
        if state.is_failed() || !state.has_text() {
            return state;
        }

        let text = state.extracted_text.as_deref().unwrap_or_default();
        match self.retriever.get_context(text).await {
            Ok(hits) => state.retrieved_context = Some(hits),
            Err(e) => state.fail("Context retrieval", e),
        }
        state
    }

    /// Stage 3: extract metrics, grounding the analysis in retrieved context.
    pub async fn analyze_text(&self, mut state: PipelineState) -> PipelineState {
        info!("step: analyze_text");
        if state.is_failed() || !state.has_text() {
            return state;
        }

        let text = state.extracted_text.as_deref().unwrap_or_default();
        let context = state
            .retrieved_context
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|hit| hit.document.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let input_text = if context.is_empty() {
            text.to_string()
        } else {
            format!("Relevant Context:\n{context}\n\nReport Text:\n{text}")
        };

        match self.analyst.analyze(&input_text).await {
            Ok(metrics) => state.metrics = Some(metrics),
            Err(e) => state.fail("Analysis", e),
        }
        state
    }

    /// Stage 4: write the executive summary from the metrics.
    pub async fn generate_report(&self, mut state: PipelineState) -> PipelineState {
        info!("step: generate_report");
        if state.is_failed() || !state.has_metrics() {
            return state;
        }

        let Some(metrics) = state.metrics.as_ref() else {
            return state;
        };
        match self.writer.generate_report(metrics).await {
            Ok(report) => state.report = Some(report),
            Err(e) => state.fail("Report generation", e),
        }
        state
    }
}

/// Builder for constructing a [`Workflow`].
///
/// All fields are required. Call [`build()`](WorkflowBuilder::build) to
/// validate and produce the workflow.
#[derive(Default)]
pub struct WorkflowBuilder {
    extractor: Option<Arc<dyn PdfExtractor>>,
    retriever: Option<Arc<ContextRetriever>>,
    completion_model: Option<Arc<dyn CompletionModel>>,
}

impl WorkflowBuilder {
    /// Set the PDF extractor.
    pub fn extractor(mut self, extractor: Arc<dyn PdfExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the context retriever.
    pub fn retriever(mut self, retriever: Arc<ContextRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the completion model shared by the analysis and report stages.
    pub fn completion_model(mut self, model: Arc<dyn CompletionModel>) -> Self {
        self.completion_model = Some(model);
        self
    }

    /// Build the [`Workflow`], validating that all collaborators are set.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::Config`] if any collaborator is missing.
    pub fn build(self) -> Result<Workflow> {
        let extractor = self
            .extractor
            .ok_or_else(|| FinsightError::Config("extractor is required".to_string()))?;
        let retriever = self
            .retriever
            .ok_or_else(|| FinsightError::Config("retriever is required".to_string()))?;
        let model = self
            .completion_model
            .ok_or_else(|| FinsightError::Config("completion_model is required".to_string()))?;

        Ok(Workflow {
            extractor,
            retriever,
            analyst: AnalysisAgent::new(Arc::clone(&model)),
            writer: ReportAgent::new(model),
        })
    }
}
