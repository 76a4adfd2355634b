//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// These are internal to the crate family: the [`FundService`](crate::FundService)
/// boundary absorbs them into empty results, so HTTP callers never see a
/// provider failure as anything other than "no data".
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested fund code was not found by the provider.
    #[error("Fund not found: {0}")]
    FundNotFound(String),

    /// The provider returned a well-formed but empty payload.
    #[error("No data returned")]
    NoData,

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::FundNotFound("000000".to_string());
        assert_eq!(format!("{}", error), "Fund not found: 000000");

        let error = MarketDataError::ProviderError {
            provider: "EASTMONEY".to_string(),
            message: "bad payload".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: EASTMONEY - bad payload"
        );
    }
}
