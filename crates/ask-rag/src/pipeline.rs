//! Query pipeline: embed, retrieve, assemble context, prompt, answer
//!
//! Every call to [`QueryPipeline::answer`] checks that the index directory is
//! there before doing any work. The index database is opened on the first
//! request that finds it and shared afterwards. Failures come back as a typed
//! [`Error`]; turning them into HTTP responses is the gateway's job.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::config::{IndexConfig, PipelineConfig, RagConfig};
use crate::error::{Error, Result};
use crate::generation::{citations_from_results, PromptBuilder};
use crate::providers::{openai, EmbeddingProvider, LlmProvider};
use crate::retrieval::{index_exists, search_blocking, VectorIndex};
use crate::types::QueryResponse;

/// Retrieval-augmented question answering
pub struct QueryPipeline {
    index_config: IndexConfig,
    index: OnceCell<Arc<VectorIndex>>,
    config: PipelineConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl QueryPipeline {
    /// Create a pipeline over explicit providers
    pub fn new(
        index_config: IndexConfig,
        config: PipelineConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            index_config,
            index: OnceCell::new(),
            config,
            embedder,
            llm,
        }
    }

    /// Create a pipeline backed by the OpenAI providers
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        let (embedder, llm) = openai::from_config(&config.openai)?;
        tracing::info!(
            "Pipeline initialized (embeddings: {}, chat: {} via {})",
            config.openai.embedding_model,
            llm.model(),
            llm.name()
        );

        Ok(Self::new(
            config.index.clone(),
            config.pipeline.clone(),
            Arc::new(embedder),
            Arc::new(llm),
        ))
    }

    /// Index location this pipeline reads from
    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }

    /// The opened index, failing with [`Error::IndexMissing`] while the
    /// directory is absent
    async fn index(&self) -> Result<Arc<VectorIndex>> {
        if !index_exists(&self.index_config).await? {
            return Err(Error::IndexMissing(self.index_config.path.clone()));
        }

        let index = self
            .index
            .get_or_try_init(|| async {
                let config = self.index_config.clone();
                let index = tokio::task::spawn_blocking(move || VectorIndex::open(&config))
                    .await
                    .map_err(|e| Error::Internal(format!("Task join error: {}", e)))??;
                tracing::info!(
                    "Vector index opened at {}",
                    self.index_config.path.display()
                );
                Ok::<_, Error>(Arc::new(index))
            })
            .await?;

        Ok(index.clone())
    }

    /// Answer a question with sources
    pub async fn answer(&self, question: &str) -> Result<QueryResponse> {
        let start = Instant::now();

        tracing::info!("Query: \"{}\"", question);

        let index = self.index().await?;

        let query_embedding = self.embedder.embed(question).await?;
        let results = search_blocking(index, query_embedding, self.config.search_limit()).await?;

        if results.is_empty() {
            tracing::warn!("No relevant chunks found for query: \"{}\"", question);
        }

        let builder = PromptBuilder::new(&self.config);
        let context = builder.build_context(&results);
        let prompt = builder.build_prompt(&context, question);

        let answer = self.llm.complete(&prompt).await?;

        let sources = citations_from_results(&results, self.config.context_limit());

        tracing::info!("Answer: {}", answer);
        tracing::info!(
            "Query completed in {}ms, {} of {} chunks used, sources: {:?}",
            start.elapsed().as_millis(),
            sources.len(),
            results.len(),
            sources
        );

        Ok(QueryResponse::new(answer, sources))
    }
}
