//! Command-line entry points for the finsight pipeline.
//!
//! Each stage is independently invokable (`parse`, `analyze`, `report`)
//! alongside the full pipeline (`run`) and corpus management (`ingest`).
//! Credentials come from `OPENAI_API_KEY` / `OPENAI_BASE_URL`, read once
//! here and passed down as configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use finsight_agents::{AnalysisAgent, LopdfExtractor, OpenAiCompletionModel, PdfExtractor, ReportAgent};
use finsight_core::OpenAiConfig;
use finsight_rag::{
    ContextRetriever, Document, DocumentStore, FlatIndex, HttpRelevanceScorer, OpenAiEmbeddingProvider,
    RelevanceScorer, Reranker, RetrievalConfig, TermOverlapScorer,
};
use finsight_workflow::Workflow;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "finsight", version, about = "Financial report analysis pipeline")]
struct Cli {
    /// Directory holding the persisted vector index.
    #[arg(long, global = true, default_value = "data/index")]
    data_dir: PathBuf,

    /// Base URL of a cross-encoder rerank sidecar. Lexical scoring when unset.
    #[arg(long, global = true)]
    reranker_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text from a PDF and print it.
    Parse {
        /// Path to the PDF report.
        pdf_path: PathBuf,
    },
    /// Extract financial metrics from a text file.
    Analyze {
        /// Path to a plain-text report.
        text_path: PathBuf,
    },
    /// Generate an executive summary from a metrics JSON file.
    Report {
        /// Path to a metrics JSON file.
        metrics_path: PathBuf,
    },
    /// Run the full parse → retrieve → analyze → report pipeline.
    Run {
        /// Path to the PDF report.
        pdf_path: PathBuf,
    },
    /// Embed text files and add them to the retrieval corpus.
    Ingest {
        /// Text files to add.
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Parse { pdf_path } => parse(&pdf_path),
        Command::Analyze { text_path } => analyze(&text_path).await,
        Command::Report { metrics_path } => report(&metrics_path).await,
        Command::Run { pdf_path } => run(&pdf_path, &cli.data_dir, cli.reranker_url.as_deref()).await,
        Command::Ingest { paths } => ingest(&paths, &cli.data_dir).await,
    }
}

/// Read credentials, or print a usage message and exit non-zero.
fn credentials() -> OpenAiConfig {
    match OpenAiConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            eprintln!("Please set OPENAI_API_KEY and OPENAI_BASE_URL environment variables.");
            std::process::exit(1);
        }
    }
}

fn make_scorer(reranker_url: Option<&str>) -> Arc<dyn RelevanceScorer> {
    match reranker_url {
        Some(url) => Arc::new(HttpRelevanceScorer::new(url)),
        None => Arc::new(TermOverlapScorer),
    }
}

async fn open_store(config: &OpenAiConfig, data_dir: &Path) -> anyhow::Result<Arc<DocumentStore>> {
    let index = FlatIndex::open(data_dir).await.context("opening vector index")?;
    let embedder = OpenAiEmbeddingProvider::new(config).context("configuring embeddings")?;
    Ok(Arc::new(DocumentStore::new(Arc::new(embedder), Arc::new(index))))
}

/// Standalone parse: extraction errors propagate — there is no
/// orchestrator here to absorb them.
fn parse(pdf_path: &Path) -> anyhow::Result<()> {
    let text = LopdfExtractor::new().extract_text(pdf_path)?;
    println!("{text}");
    Ok(())
}

async fn analyze(text_path: &Path) -> anyhow::Result<()> {
    let config = credentials();
    let text = std::fs::read_to_string(text_path)
        .with_context(|| format!("reading {}", text_path.display()))?;

    let model = Arc::new(OpenAiCompletionModel::new(&config)?);
    let metrics = AnalysisAgent::new(model).analyze(&text).await?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

async fn report(metrics_path: &Path) -> anyhow::Result<()> {
    let config = credentials();
    let data = std::fs::read_to_string(metrics_path)
        .with_context(|| format!("reading {}", metrics_path.display()))?;
    let metrics: Value = serde_json::from_str(&data).context("parsing metrics JSON")?;

    let model = Arc::new(OpenAiCompletionModel::new(&config)?);
    let summary = ReportAgent::new(model).generate_report(&metrics).await?;
    println!("{summary}");
    Ok(())
}

async fn run(pdf_path: &Path, data_dir: &Path, reranker_url: Option<&str>) -> anyhow::Result<()> {
    let config = credentials();
    let store = open_store(&config, data_dir).await?;
    let retriever = Arc::new(ContextRetriever::new(
        store,
        Reranker::new(make_scorer(reranker_url)),
        RetrievalConfig::default(),
    ));
    let model = Arc::new(OpenAiCompletionModel::new(&config)?);

    let workflow = Workflow::builder()
        .extractor(Arc::new(LopdfExtractor::new()))
        .retriever(retriever)
        .completion_model(model)
        .build()?;

    let state = workflow.run_path(pdf_path).await;
    match state.error {
        Some(error) => {
            eprintln!("Workflow failed: {error}");
            std::process::exit(1);
        }
        None => {
            println!("\n===== FINAL REPORT =====\n");
            println!("{}", state.report.unwrap_or_default());
            Ok(())
        }
    }
}

async fn ingest(paths: &[PathBuf], data_dir: &Path) -> anyhow::Result<()> {
    if paths.is_empty() {
        anyhow::bail!("no files given to ingest");
    }

    let config = credentials();
    let store = open_store(&config, data_dir).await?;

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("doc");
        documents.push(Document {
            id: format!("{stem}-{}", Uuid::new_v4()),
            text,
            metadata: HashMap::from([("path".to_string(), path.display().to_string())]),
        });
    }

    store.upsert(&documents).await?;
    println!("Ingested {} document(s) into {}", documents.len(), data_dir.display());
    Ok(())
}
