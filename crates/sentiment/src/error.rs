//! Sentiment pipeline error type.

use fundpulse_market_data::errors::MarketDataError;
use thiserror::Error;

/// Errors that abort report generation.
///
/// There is no partial-report fallback: a failed indicator feed propagates
/// out of `run_analysis` unchanged. (The news and LLM stages cannot fail —
/// the news adapter degrades to an empty list and the LLM client embeds its
/// failures in the output text.)
#[derive(Error, Debug)]
pub enum SentimentError {
    /// An indicator feed failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}
