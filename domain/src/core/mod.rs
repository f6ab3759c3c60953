//! Core domain concepts shared across all subdomains.
//!
//! - [`error::SensingError`]: per-entity failure taxonomy
//! - [`string`]: label normalization and UTF-8 safe truncation

pub mod error;
pub mod string;
