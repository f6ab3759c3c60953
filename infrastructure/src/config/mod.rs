//! Configuration loading for node-sensing
//!
//! Two files are involved:
//!
//! - the settings file, merged by [`ConfigLoader`] from (highest to lowest)
//!   environment `SENSING_*`, `--config <path>`, `./sensing.toml` or
//!   `./.sensing.toml`, `<config dir>/node-sensing/config.toml`, defaults
//! - the sources file named by `sources`, read by [`SourcesConfig`]

mod error;
mod file_config;
mod loader;
mod sources;

pub use error::ConfigError;
pub use file_config::{
    ConfigIssue, DEFAULT_SOURCES_PATH, FRED_API_KEY_ENV, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProvidersConfig, FileQuoteConfig, FileSensingConfig,
    KNOWN_SEARCH_PROVIDERS, OPENAI_API_KEY_ENV, OPENAI_BASE_URL_ENV, OPENAI_MODEL_ENV,
    SERPER_API_KEY_ENV, Severity, TAVILY_API_KEY_ENV,
};
pub use loader::ConfigLoader;
pub use sources::SourcesConfig;
