//! Read-only access to the pre-built vector index
//!
//! The index lives in a ruvector-core database inside the configured index
//! directory. Chunk text and citation metadata are stored in each entry's
//! metadata, so a search hit carries everything needed to build the context.

use std::sync::Arc;

use ruvector_core::types::{DbOptions, HnswConfig};
use ruvector_core::{DistanceMetric, SearchQuery as CoreSearchQuery, VectorDB, VectorEntry};

use crate::config::{IndexConfig, IndexMetric};
use crate::error::{Error, Result};
use crate::types::Chunk;

/// Search result with chunk and distance
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The retrieved chunk (text and metadata, no embedding)
    pub chunk: Chunk,
    /// Distance to the query (lower is better)
    pub distance: f32,
}

impl From<IndexMetric> for DistanceMetric {
    fn from(metric: IndexMetric) -> Self {
        match metric {
            IndexMetric::L2 => DistanceMetric::Euclidean,
            IndexMetric::Cosine => DistanceMetric::Cosine,
        }
    }
}

/// Whether the index directory exists
///
/// Only a definite "not found" counts as missing; any other IO failure is
/// reported as an index error naming the path.
pub async fn index_exists(config: &IndexConfig) -> Result<bool> {
    tokio::fs::try_exists(&config.path).await.map_err(|e| {
        Error::index(format!("Cannot access '{}': {}", config.path.display(), e))
    })
}

/// Vector index wrapper for ruvector-core
pub struct VectorIndex {
    db: VectorDB,
    dimensions: usize,
}

impl VectorIndex {
    /// Open an existing index
    ///
    /// Fails with [`Error::IndexMissing`] when the index directory is absent
    /// and with [`Error::Index`] when the directory holds no database.
    pub fn open(config: &IndexConfig) -> Result<Self> {
        let exists = config.path.try_exists().map_err(|e| {
            Error::index(format!("Cannot access '{}': {}", config.path.display(), e))
        })?;
        if !exists {
            return Err(Error::IndexMissing(config.path.clone()));
        }

        let file = config.file_path();
        if !file.is_file() {
            return Err(Error::index(format!("No index database at '{}'", file.display())));
        }

        let index = Self::open_db(config)?;
        tracing::debug!(
            "Opened index at {} ({} chunks, {} dims, {:?})",
            file.display(),
            index.len()?,
            index.dimensions,
            config.metric
        );

        Ok(index)
    }

    /// Create (or reopen) an index for writing, used by fixtures and tooling
    pub fn create(config: &IndexConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.path)?;
        Self::open_db(config)
    }

    fn open_db(config: &IndexConfig) -> Result<Self> {
        if config.dimensions == 0 {
            return Err(Error::index("index.dimensions must be greater than zero"));
        }

        let mut options = DbOptions::default();
        options.dimensions = config.dimensions;
        options.distance_metric = config.metric.into();
        options.storage_path = config.file_path().to_string_lossy().to_string();
        options.hnsw_config = Some(HnswConfig {
            m: config.hnsw_m,
            ef_construction: config.hnsw_ef_construction,
            ef_search: config.hnsw_ef_search,
            max_elements: config.hnsw_max_elements,
        });
        options.quantization = None;

        let db = VectorDB::new(options).map_err(|e| Error::index(e.to_string()))?;

        Ok(Self {
            db,
            dimensions: config.dimensions,
        })
    }

    /// Embedding dimensions
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Add a chunk, its text and metadata travel in the entry metadata
    pub fn insert(&self, chunk: &Chunk) -> Result<()> {
        self.check_vector("chunk embedding", &chunk.embedding)?;

        let entry = VectorEntry {
            id: Some(format!("chunk-{}", self.len()?)),
            vector: chunk.embedding.clone(),
            metadata: Some(chunk.to_vector_metadata()),
        };

        self.db.insert(entry).map_err(|e| Error::index(e.to_string()))?;
        Ok(())
    }

    /// Number of chunks
    pub fn len(&self) -> Result<usize> {
        self.db.len().map_err(|e| Error::index(e.to_string()))
    }

    /// Check if empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The `k` chunks closest to the query, closest first
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        self.check_vector("query embedding", query)?;

        if k == 0 || self.is_empty()? {
            return Ok(Vec::new());
        }

        let results = self
            .db
            .search(CoreSearchQuery {
                vector: query.to_vec(),
                k,
                filter: None,
                ef_search: None,
            })
            .map_err(|e| Error::index(e.to_string()))?;

        let mut search_results: Vec<SearchResult> = results
            .into_iter()
            .filter_map(|result| {
                let chunk = Chunk::from_vector_metadata(result.metadata.as_ref()?);
                Some(SearchResult {
                    chunk,
                    distance: result.score,
                })
            })
            .collect();

        search_results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        search_results.truncate(k);

        Ok(search_results)
    }

    fn check_vector(&self, what: &str, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::index(format!(
                "{} has {} dimensions, index has {}",
                what,
                vector.len(),
                self.dimensions
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(Error::index(format!("{} has a non-finite value", what)));
        }
        Ok(())
    }
}

/// Search an index shared between requests without blocking the runtime
pub async fn search_blocking(
    index: Arc<VectorIndex>,
    query: Vec<f32>,
    k: usize,
) -> Result<Vec<SearchResult>> {
    tokio::task::spawn_blocking(move || index.search(&query, k))
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
}
