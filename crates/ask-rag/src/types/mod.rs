//! Core types for the question answering service

pub mod document;
pub mod query;
pub mod response;

pub use document::Chunk;
pub use query::AskRequest;
pub use response::{ErrorBody, QueryResponse, SourceCitation};
