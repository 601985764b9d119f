//! Context assembly and prompt rendering

use crate::config::PipelineConfig;
use crate::retrieval::SearchResult;

/// Prompt builder for ask queries
pub struct PromptBuilder<'a> {
    config: &'a PipelineConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Join the texts of the first `max_chunks` results (never more than five)
    ///
    /// Falls back to the configured placeholder when nothing was retrieved.
    pub fn build_context(&self, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return self.config.no_context_placeholder.clone();
        }

        results
            .iter()
            .take(self.config.context_limit())
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.config.context_separator)
    }

    /// Render the prompt template with the context and the question verbatim
    pub fn build_prompt(&self, context: &str, question: &str) -> String {
        render_template(
            &self.config.prompt_template,
            &[("context", context), ("question", question)],
        )
    }
}

/// Substitute `{name}` placeholders in one pass
///
/// Substituted values are copied as-is and never scanned for placeholders,
/// so a question containing `{context}` stays literal. Unknown `{...}`
/// sequences are left untouched.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let replaced = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
