//! # finsight-agents
//!
//! The stage collaborators of the finsight pipeline:
//!
//! - [`LopdfExtractor`] — page-ordered PDF text extraction
//! - [`AnalysisAgent`] — metric extraction via a completion model
//! - [`ReportAgent`] — executive-summary generation
//! - [`OpenAiCompletionModel`] — chat-completions client (standard or
//!   OpenAI-compatible endpoints)
//! - [`MockCompletionModel`] — scripted responses for testing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finsight_agents::{AnalysisAgent, OpenAiCompletionModel};
//! use finsight_core::OpenAiConfig;
//!
//! let model = Arc::new(OpenAiCompletionModel::new(&OpenAiConfig::from_env()?)?);
//! let metrics = AnalysisAgent::new(model).analyze(&report_text).await?;
//! ```

pub mod analysis;
pub mod mock;
pub mod openai;
pub mod parser;
pub mod report;

pub use analysis::AnalysisAgent;
pub use mock::MockCompletionModel;
pub use openai::OpenAiCompletionModel;
pub use parser::{LopdfExtractor, PdfExtractor};
pub use report::ReportAgent;
