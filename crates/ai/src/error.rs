//! LLM client error types.

use thiserror::Error;

/// Errors raised while configuring or constructing an LLM client.
///
/// Generation itself does not use this type: provider-side failures are
/// returned as human-readable text inside the output string (see the crate
/// docs for why that contract is kept).
#[derive(Debug, Error)]
pub enum AiError {
    /// The configured provider name is not recognized.
    #[error("Unsupported LLM provider: {0}")]
    InvalidProvider(String),

    /// The selected provider's credential variable is unset.
    #[error("Missing API key: {0} is not set")]
    MissingApiKey(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
