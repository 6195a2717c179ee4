//! # finsight-workflow
//!
//! Stage orchestration for the finsight pipeline: a [`PipelineState`]
//! record threaded through parse → retrieve-context → analyze → report,
//! with per-stage guards and failure boundaries.
//!
//! Failure is absorbing: the first stage that fails writes
//! `PipelineState::error`, and every later stage passes the state through
//! unchanged. The orchestrator itself never fails — callers inspect the
//! returned state.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use finsight_workflow::Workflow;
//!
//! let workflow = Workflow::builder()
//!     .extractor(extractor)
//!     .retriever(retriever)
//!     .completion_model(model)
//!     .build()?;
//! let state = workflow.run_path("reports/q3.pdf").await;
//! ```

pub mod state;
pub mod workflow;

pub use state::PipelineState;
pub use workflow::{Workflow, WorkflowBuilder};
