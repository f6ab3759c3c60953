//! Application-level configuration.
//!
//! - [`SensingParams`]: waterfall windows, result caps, batch concurrency
//! - [`QuoteRetryParams`]: rate-limit retry policy for direct quotes

pub mod sensing_params;

pub use sensing_params::{QuoteRetryParams, SensingParams};
