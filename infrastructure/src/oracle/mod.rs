//! Reasoning oracle adapters

mod openai;

pub use openai::OpenAiReasoningOracle;
