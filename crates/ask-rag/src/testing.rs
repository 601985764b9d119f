//! Fakes and fixtures shared by the unit tests

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::{IndexConfig, PipelineConfig};
use crate::error::{Error, Result};
use crate::pipeline::QueryPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::VectorIndex;
use crate::types::Chunk;

/// Embedder returning a fixed vector
pub struct FakeEmbedder {
    vector: Vec<f32>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeEmbedder {
    pub fn new(vector: Vec<f32>) -> Arc<Self> {
        Arc::new(Self {
            vector,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            vector: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::embedding("Embedding failed: HTTP 401 Unauthorized"));
        }
        Ok(self.vector.clone())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Chat model that records prompts and answers with a fixed text
pub struct RecordingLlm {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// Small L2 index configuration under `root`, nothing written yet
pub fn index_config(root: &Path, dimensions: usize) -> IndexConfig {
    IndexConfig {
        path: root.join("vectorstore"),
        dimensions,
        hnsw_max_elements: 1_000,
        ..Default::default()
    }
}

/// Index directory under `root` holding `chunks`
///
/// The database handle is dropped before returning so the index can be
/// opened again by the code under test.
pub fn write_index(root: &Path, dimensions: usize, chunks: Vec<Chunk>) -> IndexConfig {
    let config = index_config(root, dimensions);
    let index = VectorIndex::create(&config).unwrap();
    for chunk in &chunks {
        index.insert(chunk).unwrap();
    }
    drop(index);
    config
}

/// Chunk with title/source metadata whose embedding is `[distance, 0.0]`
pub fn chunk_at(distance: f32, title: &str, source: &str, text: &str) -> Chunk {
    Chunk::new(text, vec![distance, 0.0])
        .with_metadata("title", title)
        .with_metadata("source", source)
}

/// Pipeline over the given index with fake providers
pub fn pipeline(
    index: IndexConfig,
    embedder: Arc<FakeEmbedder>,
    llm: Arc<RecordingLlm>,
) -> QueryPipeline {
    QueryPipeline::new(index, PipelineConfig::default(), embedder, llm)
}
