//! # finsight-core
//!
//! Shared seams for the finsight pipeline: the [`CompletionModel`] trait,
//! credential configuration, and the error taxonomy.
//!
//! Every other finsight crate depends on this one; it depends on nothing
//! but the async/error/serde foundations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use finsight_core::{CompletionModel, OpenAiConfig};
//!
//! let config = OpenAiConfig::from_env()?;
//! let completion = model.complete("Summarize: …", 0.2).await?;
//! ```

pub mod completion;
pub mod config;
pub mod error;

pub use completion::CompletionModel;
pub use config::{OpenAiConfig, DEFAULT_COMPLETION_MODEL};
pub use error::{FinsightError, Result};
