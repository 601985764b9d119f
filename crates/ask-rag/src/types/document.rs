//! Indexed chunk type with the metadata used for citations

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Value reported for citation fields the chunk metadata does not carry
pub const MISSING_METADATA: &str = "N/A";

/// Vector entry metadata key holding the chunk text
pub const CONTENT_KEY: &str = "content";

/// A pre-split piece of a source document stored in the vector index
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Chunk text
    pub text: String,
    /// Free-form metadata written by the indexer (`title`, `source`, ...)
    pub metadata: Map<String, Value>,
    /// Embedding of `text`, empty for chunks read back from a search
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a chunk without metadata
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            metadata: Map::new(),
            embedding,
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Document title, if the indexer recorded one
    pub fn title(&self) -> Option<&str> {
        self.metadata_str("title")
    }

    /// Document URL or path, if the indexer recorded one
    pub fn source(&self) -> Option<&str> {
        self.metadata_str("source")
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Flatten into vector entry metadata, the text under [`CONTENT_KEY`]
    pub fn to_vector_metadata(&self) -> HashMap<String, Value> {
        let mut meta: HashMap<String, Value> = self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        meta.insert(CONTENT_KEY.to_string(), Value::String(self.text.clone()));
        meta
    }

    /// Rebuild a chunk from vector entry metadata
    ///
    /// A missing or non-string content entry gives an empty text; every other
    /// key becomes chunk metadata.
    pub fn from_vector_metadata(metadata: &HashMap<String, Value>) -> Self {
        let text = metadata
            .get(CONTENT_KEY)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let metadata = metadata
            .iter()
            .filter(|(k, _)| k.as_str() != CONTENT_KEY)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            text,
            metadata,
            embedding: Vec::new(),
        }
    }
}
