//! Agent behavior over the scripted completion model.

use std::sync::Arc;

use finsight_agents::{AnalysisAgent, MockCompletionModel, ReportAgent};
use serde_json::json;

#[tokio::test]
async fn analysis_prompt_carries_the_document_text() {
    let model = Arc::new(MockCompletionModel::new([r#"{"Revenue": "100"}"#]));
    let agent = AnalysisAgent::new(model.clone());

    let metrics = agent.analyze("Q3 revenue was 100").await.unwrap();

    assert_eq!(metrics, json!({"Revenue": "100"}));
    let prompts = model.prompts();
    assert!(prompts[0].starts_with("You are a financial analyst."));
    assert!(prompts[0].ends_with("Q3 revenue was 100"));
}

#[tokio::test]
async fn analysis_recovers_unparseable_completion_into_data() {
    let model = Arc::new(MockCompletionModel::new(["nothing structured here"]));
    let agent = AnalysisAgent::new(model);

    let metrics = agent.analyze("text").await.unwrap();

    assert!(metrics["error"].as_str().unwrap().starts_with("Failed to parse response"));
    assert_eq!(metrics["raw_response"], "nothing structured here");
}

#[tokio::test]
async fn report_serializes_metrics_and_trims_the_completion() {
    let model = Arc::new(MockCompletionModel::new(["  Revenue doubled.\n"]));
    let agent = ReportAgent::new(model.clone());

    let report =
        agent.generate_report(&json!({"Revenue": "100", "Net Income": "20"})).await.unwrap();

    assert_eq!(report, "Revenue doubled.");
    let prompts = model.prompts();
    assert!(prompts[0].starts_with("You are a financial report writer."));
    assert!(prompts[0].contains(r#""Revenue":"100""#));
}

#[tokio::test]
async fn completion_failure_propagates() {
    let agent = AnalysisAgent::new(Arc::new(MockCompletionModel::failing()));

    let err = agent.analyze("text").await.unwrap_err();
    assert!(err.to_string().contains("Completion error"));
}
