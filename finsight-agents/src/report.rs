//! Report generation from extracted metrics.

use std::sync::Arc;

use finsight_core::{CompletionModel, Result};
use serde_json::Value;
use tracing::info;

/// Slight variability suits prose better than extraction.
const REPORT_TEMPERATURE: f32 = 0.3;

const REPORT_PROMPT: &str = "You are a financial report writer. Given the following extracted \
financial metrics and trends (in JSON), write a concise, clear, and professional summary \
suitable for a business executive. Highlight the most important findings and trends.\n\n\
Financial Metrics and Trends:\n";

/// Writes an executive summary from a metrics object.
///
/// The metrics object may itself signal an upstream extraction failure
/// (`{"error": …, "raw_response": …}`); it is passed to the writer as-is so
/// the summary can narrate the failure.
pub struct ReportAgent {
    model: Arc<dyn CompletionModel>,
}

impl ReportAgent {
    /// Create an agent over the given completion model.
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Generate a summary of `metrics`.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::Completion`](finsight_core::FinsightError::Completion)
    /// if the completion call fails.
    pub async fn generate_report(&self, metrics: &Value) -> Result<String> {
        info!(model = self.model.name(), "starting report generation");

        let prompt = format!("{REPORT_PROMPT}{metrics}");
        let response = self.model.complete(&prompt, REPORT_TEMPERATURE).await?;

        info!("report generated");
        Ok(response.trim().to_string())
    }
}
