//! News search error types.

use thiserror::Error;

/// Errors from the news search provider.
///
/// Internal to the crate: the public search operations absorb these into
/// empty result lists.
#[derive(Error, Debug)]
pub enum NewsError {
    /// No API key was supplied for the keyed search endpoint.
    #[error("Missing API key for news search")]
    MissingApiKey,

    /// The provider rejected or failed the request.
    #[error("Search provider error: {0}")]
    Provider(String),

    /// A network error occurred while calling the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
