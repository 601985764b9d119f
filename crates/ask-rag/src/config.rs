//! Configuration for the question answering service
//!
//! Loaded once at process start: defaults, then an optional TOML file, then the
//! API key from the environment. The resulting [`RagConfig`] is handed to the
//! pipeline and server constructors explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the embedding/completion API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Prompt template used when none is configured
pub const DEFAULT_PROMPT_TEMPLATE: &str = "
以下のコンテキストに基づいて、うまく活用させながら質問に答えてください：

{context}

---

上記のコンテキストに基づいて、次の質問に答えてください：{question}
";

/// Context used when retrieval finds nothing
pub const DEFAULT_NO_CONTEXT: &str = "利用可能なコンテキストはありません。";

/// Upper bound on chunks placed in the context and cited back
pub const MAX_CONTEXT_CHUNKS: usize = 5;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Embedding and chat completion API
    pub openai: OpenAiConfig,
    /// On-disk vector index
    pub index: IndexConfig,
    /// Context assembly and prompt rendering
    pub pipeline: PipelineConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))
    }

    /// Defaults or file contents, with the API key taken from the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Pick up the API key from the environment if it is set
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.openai.api_key = ApiKey::new(key);
            }
        }
    }

    /// Check the configuration before serving
    pub fn validate(&self) -> Result<()> {
        if self.openai.api_key.is_empty() {
            return Err(Error::Config(format!("{} is not set", API_KEY_ENV)));
        }
        if !(1..=MAX_CONTEXT_CHUNKS).contains(&self.pipeline.max_chunks) {
            return Err(Error::Config(format!(
                "pipeline.max_chunks must be within 1-{}, got {}",
                MAX_CONTEXT_CHUNKS, self.pipeline.max_chunks
            )));
        }
        if self.pipeline.search_k == Some(0) {
            return Err(Error::Config("pipeline.search_k must be at least 1".to_string()));
        }
        if self.index.dimensions == 0 {
            return Err(Error::Config("index.dimensions must be at least 1".to_string()));
        }
        for placeholder in ["{context}", "{question}"] {
            if !self.pipeline.prompt_template.contains(placeholder) {
                return Err(Error::Config(format!(
                    "pipeline.prompt_template is missing {}",
                    placeholder
                )));
            }
        }
        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(Error::Config(format!(
                "openai.temperature must be within 0.0-2.0, got {}",
                self.openai.temperature
            )));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            enable_cors: true,
        }
    }
}

/// OpenAI-compatible API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL (without trailing slash)
    pub base_url: String,
    /// API key, only ever read from the environment
    #[serde(skip)]
    pub api_key: ApiKey,
    /// Embedding model name
    pub embedding_model: String,
    /// Chat model name
    pub chat_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: ApiKey::default(),
            embedding_model: "text-embedding-ada-002".to_string(),
            chat_model: "gpt-4o".to_string(),
            temperature: 0.7,
            timeout_secs: None,
        }
    }
}

/// Distance metric the index was built with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMetric {
    /// Euclidean distance
    #[default]
    L2,
    /// Cosine distance
    Cosine,
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory holding the pre-built index
    pub path: PathBuf,
    /// Embedding dimensions, must match the embedding model
    pub dimensions: usize,
    /// Distance metric the index was built with
    pub metric: IndexMetric,
    /// HNSW M parameter (connections per layer)
    pub hnsw_m: usize,
    /// HNSW ef_construction parameter
    pub hnsw_ef_construction: usize,
    /// HNSW ef_search parameter
    pub hnsw_ef_search: usize,
    /// HNSW capacity
    pub hnsw_max_elements: usize,
}

impl IndexConfig {
    /// Name of the database file inside the index directory
    pub const FILE_NAME: &'static str = "index.db";

    /// Full path of the index file
    pub fn file_path(&self) -> PathBuf {
        self.path.join(Self::FILE_NAME)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("vectorstore"),
            dimensions: 1536, // text-embedding-ada-002
            metric: IndexMetric::L2,
            hnsw_m: 32,
            hnsw_ef_construction: 200,
            hnsw_ef_search: 100,
            hnsw_max_elements: 1_000_000,
        }
    }
}

/// Retrieval and prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunks used for the context and the citations, at most 5
    pub max_chunks: usize,
    /// Neighbours requested from the index (defaults to the context size)
    pub search_k: Option<usize>,
    /// Separator between chunk texts in the context
    pub context_separator: String,
    /// Context used when nothing was retrieved
    pub no_context_placeholder: String,
    /// Prompt template with `{context}` and `{question}` placeholders
    pub prompt_template: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunks: 5,
            search_k: None,
            context_separator: "\n\n---\n\n".to_string(),
            no_context_placeholder: DEFAULT_NO_CONTEXT.to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Chunks that go into the context, never more than [`MAX_CONTEXT_CHUNKS`]
    pub fn context_limit(&self) -> usize {
        self.max_chunks.min(MAX_CONTEXT_CHUNKS)
    }

    /// Neighbours to request from the index
    pub fn search_limit(&self) -> usize {
        self.search_k.unwrap_or_else(|| self.context_limit())
    }
}

/// API key that never shows up in logs
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}
