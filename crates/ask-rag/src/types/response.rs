//! Response types for ask queries

use serde::{Deserialize, Serialize};

use super::document::{Chunk, MISSING_METADATA};

/// Source document a chunk came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    /// Document title
    pub title: String,
    /// Document URL or path
    pub url: String,
}

impl SourceCitation {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Build a citation from chunk metadata, `"N/A"` for missing fields
    pub fn from_chunk(chunk: &Chunk) -> Self {
        Self {
            title: chunk.title().unwrap_or(MISSING_METADATA).to_string(),
            url: chunk.source().unwrap_or(MISSING_METADATA).to_string(),
        }
    }
}

/// Response from an ask query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer
    pub answer: String,
    /// Sources of the chunks used as context, in ranked order
    pub sources: Vec<SourceCitation>,
}

impl QueryResponse {
    pub fn new(answer: impl Into<String>, sources: Vec<SourceCitation>) -> Self {
        Self {
            answer: answer.into(),
            sources,
        }
    }
}

/// Error body returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
