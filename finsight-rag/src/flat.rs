//! Flat vector index with cosine distance and optional snapshot persistence.
//!
//! [`FlatIndex`] keeps all records in a `HashMap` behind a
//! `tokio::sync::RwLock`, scans the whole map on query, and optionally
//! mirrors its contents to an `index.json` snapshot in a configurable
//! directory. Suitable for corpora small enough that exact scan beats an
//! approximate structure.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{RagError, Result};
use crate::index::{IndexQueryResult, VectorIndex};

const SNAPSHOT_FILE: &str = "index.json";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexRecord {
    id: String,
    embedding: Vec<f32>,
    document: String,
    metadata: HashMap<String, String>,
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    records: Vec<&'a IndexRecord>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    records: Vec<IndexRecord>,
}

/// An exact-scan cosine-distance index, optionally persisted as a JSON
/// snapshot.
///
/// # Example
///
/// ```rust,ignore
/// use finsight_rag::FlatIndex;
///
/// let index = FlatIndex::open("data/index").await?; // loads prior snapshot
/// let ephemeral = FlatIndex::in_memory();
/// ```
#[derive(Debug, Default)]
pub struct FlatIndex {
    records: RwLock<HashMap<String, IndexRecord>>,
    snapshot_path: Option<PathBuf>,
}

impl FlatIndex {
    /// Create an empty index with no persistence.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a persistent index rooted at `dir`.
    ///
    /// Creates the directory if needed and loads an existing snapshot.
    /// Every subsequent write rewrites the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::StoreWrite`] if the directory cannot be created
    /// or an existing snapshot cannot be read.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await.map_err(|e| RagError::StoreWrite {
            backend: "Flat".into(),
            message: format!("cannot create index directory '{}': {e}", dir.display()),
        })?;

        let snapshot_path = dir.join(SNAPSHOT_FILE);
        let mut records = HashMap::new();

        match tokio::fs::read_to_string(&snapshot_path).await {
            Ok(data) => {
                let snapshot: SnapshotIn =
                    serde_json::from_str(&data).map_err(|e| RagError::StoreWrite {
                        backend: "Flat".into(),
                        message: format!("corrupt snapshot '{}': {e}", snapshot_path.display()),
                    })?;
                if snapshot.version != SNAPSHOT_VERSION {
                    warn!(
                        found = snapshot.version,
                        expected = SNAPSHOT_VERSION,
                        "snapshot version mismatch, starting empty"
                    );
                } else {
                    records =
                        snapshot.records.into_iter().map(|r| (r.id.clone(), r)).collect();
                    info!(record_count = records.len(), "loaded index snapshot");
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %snapshot_path.display(), "no snapshot, starting empty");
            }
            Err(e) => {
                return Err(RagError::StoreWrite {
                    backend: "Flat".into(),
                    message: format!("cannot read snapshot '{}': {e}", snapshot_path.display()),
                });
            }
        }

        Ok(Self { records: RwLock::new(records), snapshot_path: Some(snapshot_path) })
    }

    /// The number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the index holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn persist(&self, records: &HashMap<String, IndexRecord>) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let mut ordered: Vec<&IndexRecord> = records.values().collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        let snapshot = SnapshotOut { version: SNAPSHOT_VERSION, records: ordered };

        let data = serde_json::to_string_pretty(&snapshot).map_err(|e| RagError::StoreWrite {
            backend: "Flat".into(),
            message: format!("cannot serialize snapshot: {e}"),
        })?;
        tokio::fs::write(path, data).await.map_err(|e| RagError::StoreWrite {
            backend: "Flat".into(),
            message: format!("cannot write snapshot '{}': {e}", path.display()),
        })?;

        debug!(record_count = records.len(), "wrote index snapshot");
        Ok(())
    }
}

/// Cosine distance between two vectors: `1 - cos(a, b)`.
///
/// Returns 1.0 (maximally distant) if either vector has zero magnitude.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for FlatIndex {
    async fn add(
        &self,
        ids: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        documents: Vec<String>,
        metadatas: Vec<HashMap<String, String>>,
    ) -> Result<()> {
        if ids.len() != embeddings.len()
            || ids.len() != documents.len()
            || ids.len() != metadatas.len()
        {
            return Err(RagError::StoreWrite {
                backend: "Flat".into(),
                message: format!(
                    "mismatched argument lengths: {} ids, {} embeddings, {} documents, {} metadatas",
                    ids.len(),
                    embeddings.len(),
                    documents.len(),
                    metadatas.len()
                ),
            });
        }

        let mut records = self.records.write().await;
        for (((id, embedding), document), metadata) in
            ids.into_iter().zip(embeddings).zip(documents).zip(metadatas)
        {
            records.insert(id.clone(), IndexRecord { id, embedding, document, metadata });
        }

        self.persist(&records).await
    }

    async fn query(&self, embedding: &[f32], n_results: usize) -> Result<IndexQueryResult> {
        let records = self.records.read().await;

        let mut scored: Vec<(&IndexRecord, f32)> = records
            .values()
            .map(|record| (record, cosine_distance(&record.embedding, embedding)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n_results);

        let mut result = IndexQueryResult::default();
        for (record, distance) in scored {
            result.ids.push(record.id.clone());
            result.documents.push(record.document.clone());
            result.metadatas.push(record.metadata.clone());
            result.distances.push(distance);
        }
        Ok(result)
    }
}
