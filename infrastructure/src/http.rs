//! Shared HTTP client
//!
//! One [`reqwest::Client`] is built at startup and cloned into every adapter;
//! clones share the connection pool.

use std::time::Duration;

pub const USER_AGENT: &str = concat!("node-sensing/", env!("CARGO_PKG_VERSION"));

/// Build the client used by all outbound adapters.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Leading part of an error body, for log and error messages.
pub(crate) fn body_excerpt(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
