//! Prompt domain
//!
//! Extraction prompts and evidence rendering for the reasoning oracle.

mod template;

pub use template::PromptTemplate;
