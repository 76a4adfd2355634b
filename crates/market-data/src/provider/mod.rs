//! Market data providers.

pub mod eastmoney;
mod traits;

pub use traits::{FundDataProvider, SentimentFeedProvider};
