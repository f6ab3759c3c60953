//! Configuration errors. These are the only fatal errors of a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("failed to load sources file {path}: {message}")]
    Sources { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub(crate) fn sources(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Sources {
            path: path.into(),
            message: message.into(),
        }
    }
}
