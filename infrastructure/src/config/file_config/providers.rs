//! Provider configuration from TOML (`[providers]` section)
//!
//! Every credential can also come from the environment; an explicit value in
//! the file wins over the environment variable.

use serde::{Deserialize, Serialize};

pub const TAVILY_API_KEY_ENV: &str = "TAVILY_API_KEY";
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";
pub const FRED_API_KEY_ENV: &str = "FRED_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";

/// Search backends known to the adapter layer.
pub const KNOWN_SEARCH_PROVIDERS: &[&str] = &["tavily", "serper"];

const DEFAULT_ORACLE_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ORACLE_MODEL: &str = "gpt-4o-mini";

/// Raw `[providers]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Search backends in fallback order
    pub search: Vec<String>,
    pub tavily_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub fred_api_key: Option<String>,
    pub oracle_api_key: Option<String>,
    /// OpenAI-compatible endpoint root (up to and including `/v1`)
    pub oracle_base_url: Option<String>,
    pub oracle_model: Option<String>,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            search: KNOWN_SEARCH_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            tavily_api_key: None,
            serper_api_key: None,
            fred_api_key: None,
            oracle_api_key: None,
            oracle_base_url: None,
            oracle_model: None,
        }
    }
}

impl FileProvidersConfig {
    pub fn tavily_key(&self) -> Option<String> {
        resolve(&self.tavily_api_key, TAVILY_API_KEY_ENV)
    }

    pub fn serper_key(&self) -> Option<String> {
        resolve(&self.serper_api_key, SERPER_API_KEY_ENV)
    }

    pub fn fred_key(&self) -> Option<String> {
        resolve(&self.fred_api_key, FRED_API_KEY_ENV)
    }

    pub fn oracle_key(&self) -> Option<String> {
        resolve(&self.oracle_api_key, OPENAI_API_KEY_ENV)
    }

    pub fn oracle_base_url(&self) -> String {
        resolve(&self.oracle_base_url, OPENAI_BASE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_ORACLE_BASE_URL.to_string())
    }

    pub fn oracle_model(&self) -> String {
        resolve(&self.oracle_model, OPENAI_MODEL_ENV)
            .unwrap_or_else(|| DEFAULT_ORACLE_MODEL.to_string())
    }

    /// Entries of `search` that no adapter implements.
    pub fn unknown_search_providers(&self) -> Vec<&str> {
        self.search
            .iter()
            .map(String::as_str)
            .filter(|name| !KNOWN_SEARCH_PROVIDERS.contains(&name.to_lowercase().as_str()))
            .collect()
    }
}

fn resolve(explicit: &Option<String>, env_var: &str) -> Option<String> {
    explicit
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| {
            std::env::var(env_var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_order() {
        let config = FileProvidersConfig::default();
        assert_eq!(config.search, vec!["tavily", "serper"]);
        assert!(config.unknown_search_providers().is_empty());
    }

    #[test]
    fn test_explicit_value_wins() {
        let config = FileProvidersConfig {
            oracle_model: Some("deepseek-chat".into()),
            oracle_base_url: Some("https://api.deepseek.com/v1".into()),
            ..Default::default()
        };
        assert_eq!(config.oracle_model(), "deepseek-chat");
        assert_eq!(config.oracle_base_url(), "https://api.deepseek.com/v1");
    }

    #[test]
    fn test_blank_value_is_ignored() {
        let config = FileProvidersConfig {
            tavily_api_key: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            config.tavily_key(),
            std::env::var(TAVILY_API_KEY_ENV)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        );
    }

    #[test]
    fn test_unknown_search_provider() {
        let config = FileProvidersConfig {
            search: vec!["Tavily".into(), "bing".into()],
            ..Default::default()
        };
        assert_eq!(config.unknown_search_providers(), vec!["bing"]);
    }
}
