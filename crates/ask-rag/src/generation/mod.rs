//! Prompt construction and citation shaping

pub mod citation;
pub mod prompt;

pub use citation::citations_from_results;
pub use prompt::{render_template, PromptBuilder};
