//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod providers;
mod quote;
mod sensing;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{
    FRED_API_KEY_ENV, FileProvidersConfig, KNOWN_SEARCH_PROVIDERS, OPENAI_API_KEY_ENV,
    OPENAI_BASE_URL_ENV, OPENAI_MODEL_ENV, SERPER_API_KEY_ENV, TAVILY_API_KEY_ENV,
};
pub use quote::FileQuoteConfig;
pub use sensing::FileSensingConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the whitelist / routing / symbol file
pub const DEFAULT_SOURCES_PATH: &str = "config/sources.toml";

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Waterfall windows, caps and concurrency
    pub sensing: FileSensingConfig,
    /// Direct quote retry policy
    pub quote: FileQuoteConfig,
    /// Backends and credentials
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Path of the sources file
    pub sources: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            sensing: FileSensingConfig::default(),
            quote: FileQuoteConfig::default(),
            providers: FileProvidersConfig::default(),
            output: FileOutputConfig::default(),
            sources: PathBuf::from(DEFAULT_SOURCES_PATH),
        }
    }
}

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The run proceeds with a fallback
    Warning,
    /// The run cannot start
    Error,
}

/// A single problem found while validating configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.sensing.max_concurrency == 0 {
            issues.push(ConfigIssue::error(
                "sensing.max_concurrency",
                "must be greater than 0",
            ));
        }
        if self.sensing.per_query_results == 0 {
            issues.push(ConfigIssue::error(
                "sensing.per_query_results",
                "must be greater than 0",
            ));
        }
        if self.sensing.fullweb_max_results == 0 {
            issues.push(ConfigIssue::error(
                "sensing.fullweb_max_results",
                "must be greater than 0",
            ));
        }
        if self.sensing.whitelist_recency_days > self.sensing.fullweb_recency_days {
            issues.push(ConfigIssue::warning(
                "sensing.whitelist_recency_days",
                format!(
                    "whitelist window ({} days) is wider than the open-web window ({} days)",
                    self.sensing.whitelist_recency_days, self.sensing.fullweb_recency_days
                ),
            ));
        }

        if self.quote.enabled && self.quote.max_attempts == 0 {
            issues.push(ConfigIssue::warning(
                "quote.max_attempts",
                "0 attempts disables direct quotes; set quote.enabled = false instead",
            ));
        }

        for name in self.providers.unknown_search_providers() {
            issues.push(ConfigIssue::warning(
                "providers.search",
                format!(
                    "unknown search provider '{}' is ignored (known: {})",
                    name,
                    KNOWN_SEARCH_PROVIDERS.join(", ")
                ),
            ));
        }

        issues
    }
}
