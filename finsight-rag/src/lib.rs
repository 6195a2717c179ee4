//! # finsight-rag
//!
//! Retrieval-augmentation subsystem for the finsight pipeline: a document
//! store over a pluggable vector index, a pairwise reranker, and the
//! retrieval stage composing the two.
//!
//! ## Overview
//!
//! Retrieval is a two-stage retrieve-then-rerank pattern:
//!
//! 1. [`DocumentStore::search`] — embed the query and run a cheap k-NN
//!    query for recall.
//! 2. [`Reranker::rerank`] — score every shortlisted (query, candidate)
//!    pair with a [`RelevanceScorer`] for precision.
//!
//! [`ContextRetriever`] wires both behind a single `get_context` call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finsight_rag::{
//!     ContextRetriever, DocumentStore, FlatIndex, Reranker, RetrievalConfig,
//!     TermOverlapScorer,
//! };
//!
//! let store = Arc::new(DocumentStore::new(
//!     Arc::new(embedder),
//!     Arc::new(FlatIndex::open("data/index").await?),
//! ));
//! let retriever = ContextRetriever::new(
//!     store,
//!     Reranker::new(Arc::new(TermOverlapScorer)),
//!     RetrievalConfig::default(),
//! );
//! let context = retriever.get_context(&report_text).await?;
//! ```

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod flat;
pub mod index;
pub mod openai;
pub mod reranker;
pub mod retrieval;
pub mod scorer;
pub mod store;

pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use document::{Document, RetrievalHit};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use flat::FlatIndex;
pub use index::{IndexQueryResult, VectorIndex};
pub use openai::OpenAiEmbeddingProvider;
pub use reranker::Reranker;
pub use retrieval::ContextRetriever;
pub use scorer::{HttpRelevanceScorer, RelevanceScorer, TermOverlapScorer};
pub use store::DocumentStore;
