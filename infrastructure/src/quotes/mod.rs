//! Direct quote adapters

mod yahoo;

pub use yahoo::YahooQuoteProvider;
