//! Metric extraction from report text.

use std::sync::Arc;

use finsight_core::{CompletionModel, Result};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Near-deterministic sampling for extraction.
const ANALYSIS_TEMPERATURE: f32 = 0.2;

const ANALYSIS_PROMPT: &str = "You are a financial analyst. Extract the following key metrics \
from the provided financial report text:\n\
- Revenue\n\
- Net Income\n\
- Operating Expenses\n\
- Gross Profit\n\
- Year-over-Year Growth\n\
- Any notable financial trends\n\
Return the results as a JSON object with clear keys.\n\n\
Financial Report Text:\n";

/// Identifies key financial metrics and trends in extracted report text.
///
/// The completion is expected to contain one JSON object; it is located by
/// the first `{` and the last `}` in the response. A completion that cannot
/// be parsed is recovered into an error-flagged result object rather than a
/// propagated error, so the caller always gets metrics-shaped data back.
pub struct AnalysisAgent {
    model: Arc<dyn CompletionModel>,
}

impl AnalysisAgent {
    /// Create an agent over the given completion model.
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Extract metrics from `document_text`.
    ///
    /// Returns the parsed JSON object, or
    /// `{"error": …, "raw_response": …}` when the completion does not
    /// contain valid JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::Completion`](finsight_core::FinsightError::Completion)
    /// only when the completion call itself fails.
    pub async fn analyze(&self, document_text: &str) -> Result<Value> {
        info!(model = self.model.name(), text_len = document_text.len(), "starting analysis");

        let prompt = format!("{ANALYSIS_PROMPT}{document_text}");
        let response = self.model.complete(&prompt, ANALYSIS_TEMPERATURE).await?;

        Ok(parse_metrics(&response))
    }
}

/// Parse the JSON object substring of a completion, recovering parse
/// failures into an error-flagged object.
fn parse_metrics(response: &str) -> Value {
    let parsed = json_object_span(response)
        .ok_or_else(|| "no JSON object in response".to_string())
        .and_then(|span| serde_json::from_str::<Value>(span).map_err(|e| e.to_string()));

    match parsed {
        Ok(metrics) => {
            info!("analysis completed");
            metrics
        }
        Err(e) => {
            warn!(error = %e, "completion was not valid JSON");
            json!({
                "error": format!("Failed to parse response: {e}"),
                "raw_response": response,
            })
        }
    }
}

/// The substring between the first `{` and the last `}`, inclusive.
fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_surrounded_by_prose() {
        let metrics = parse_metrics("Here you go:\n{\"Revenue\": \"100\"}\nLet me know!");
        assert_eq!(metrics["Revenue"], "100");
    }

    #[test]
    fn keeps_nested_braces_intact() {
        let metrics = parse_metrics("{\"trends\": {\"growth\": \"12%\"}}");
        assert_eq!(metrics["trends"]["growth"], "12%");
    }

    #[test]
    fn response_without_braces_becomes_error_object() {
        let metrics = parse_metrics("I could not find any metrics.");
        assert!(metrics["error"].as_str().unwrap().starts_with("Failed to parse response"));
        assert_eq!(metrics["raw_response"], "I could not find any metrics.");
    }

    #[test]
    fn malformed_json_becomes_error_object() {
        let metrics = parse_metrics("{\"Revenue\": }");
        assert!(metrics.get("error").is_some());
        assert_eq!(metrics["raw_response"], "{\"Revenue\": }");
    }
}
