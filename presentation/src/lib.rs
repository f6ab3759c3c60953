//! Presentation layer for node-sensing
//!
//! This crate contains CLI definitions, the entity file reader, output
//! formatters and progress reporters.

pub mod cli;
pub mod input;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, EnrichArgs};
pub use input::parse_entities;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
