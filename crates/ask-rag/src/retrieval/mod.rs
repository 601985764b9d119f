//! Similarity search over the pre-built chunk index

pub mod index;

pub use index::{index_exists, search_blocking, SearchResult, VectorIndex};
