//! Infrastructure layer for node-sensing
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod oracle;
pub mod quotes;
pub mod search;
pub mod structured;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat,
    FileProvidersConfig, FileQuoteConfig, FileSensingConfig, Severity, SourcesConfig,
};
pub use http::build_client;
pub use oracle::OpenAiReasoningOracle;
pub use quotes::YahooQuoteProvider;
pub use search::{
    FallbackSearchProvider, SerperSearchProvider, TavilySearchProvider, build_search_chain,
};
pub use structured::FredStructuredProvider;
