//! Structured data adapters

mod fred;

pub use fred::FredStructuredProvider;
