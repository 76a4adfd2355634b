//! Fundpulse News Crate
//!
//! Thin client over a Tavily-style news search API. Results are passed
//! through as the provider serves them; a missing API key or any provider
//! failure degrades to an empty list, matching the service's adapter
//! boundary contract.

mod client;
mod error;
mod models;

pub use client::NewsSearchClient;
pub use error::NewsError;
pub use models::NewsItem;
