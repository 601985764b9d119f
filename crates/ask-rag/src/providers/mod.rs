//! Provider abstractions for embeddings and chat completion
//!
//! The pipeline only talks to these traits; the OpenAI-backed implementations
//! are wired in at startup from the configuration.

pub mod embedding;
pub mod llm;
pub mod openai;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use openai::{OpenAiChat, OpenAiClient, OpenAiEmbedder};
