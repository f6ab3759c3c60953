//! Configuration value objects for the domain layer

mod output_format;

pub use output_format::OutputFormat;
