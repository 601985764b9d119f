//! Source citations for the chunks used as context

use crate::config::MAX_CONTEXT_CHUNKS;
use crate::retrieval::SearchResult;
use crate::types::SourceCitation;

/// Citations for the first `max` results (at most five), in ranked order
pub fn citations_from_results(results: &[SearchResult], max: usize) -> Vec<SourceCitation> {
    results
        .iter()
        .take(max.min(MAX_CONTEXT_CHUNKS))
        .map(|r| SourceCitation::from_chunk(&r.chunk))
        .collect()
}
