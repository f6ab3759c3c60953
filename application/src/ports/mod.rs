//! Port definitions (interfaces for external systems)

pub mod progress;
pub mod quote_provider;
pub mod reasoning_oracle;
pub mod search_provider;
pub mod structured_provider;
