pub mod aggregate;
pub mod analysis;
pub mod core;
pub mod fetch;
pub mod output;
pub mod scrape;

// Re-exports
pub use aggregate::{extract_peers, extract_primary, Aggregator};
pub use crate::core::types::AggregateResult;
pub use fetch::{Fetcher, HttpFetcher};
