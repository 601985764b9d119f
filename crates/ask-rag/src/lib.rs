//! ask-rag: question answering over a precomputed vector index
//!
//! A question posted to `/ask` is embedded, matched against a pre-built
//! on-disk chunk index, and answered by a chat model from the best matching
//! chunks. The answer comes back with the titles and URLs of the chunks used.

pub mod config;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::QueryPipeline;
pub use types::{
    document::Chunk,
    query::AskRequest,
    response::{QueryResponse, SourceCitation},
};
