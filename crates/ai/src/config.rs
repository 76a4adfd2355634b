//! LLM provider configuration.
//!
//! Configuration is read from the environment exactly once, at startup, and
//! carried as an explicit struct from then on; client constructors never
//! touch the environment themselves.

use std::str::FromStr;

use crate::error::AiError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Which LLM backend to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
    /// An OpenAI-compatible deployment; identical wire protocol, custom
    /// base URL.
    OpenAiCompatible,
}

impl FromStr for LlmProvider {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "openai_compatible" => Ok(Self::OpenAiCompatible),
            other => Err(AiError::InvalidProvider(other.to_string())),
        }
    }
}

/// Resolved LLM configuration.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub provider: LlmProvider,

    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Custom Gemini endpoint; the public API host when unset.
    pub gemini_api_endpoint: Option<String>,

    pub openai_api_key: Option<String>,
    /// Custom base URL; the public OpenAI host when unset.
    pub openai_base_url: Option<String>,
    pub openai_model: String,
}

impl LlmConfig {
    /// Read the configuration from the environment.
    ///
    /// `LLM_PROVIDER` defaults to `gemini`; an unrecognized value is a typed
    /// error, never a silent fallback. Missing credentials are not checked
    /// here — the client factory fails fast on the one the selected provider
    /// actually needs.
    pub fn from_env() -> Result<Self, AiError> {
        let provider = std::env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "gemini".to_string())
            .parse::<LlmProvider>()?;

        Ok(Self {
            provider,
            gemini_api_key: env_non_empty("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_endpoint: env_non_empty("GEMINI_API_ENDPOINT"),
            openai_api_key: env_non_empty("OPENAI_API_KEY"),
            openai_base_url: env_non_empty("OPENAI_BASE_URL"),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("gemini".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert_eq!("OpenAI".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert_eq!(
            "openai_compatible".parse::<LlmProvider>().unwrap(),
            LlmProvider::OpenAiCompatible
        );
    }

    #[test]
    fn test_unknown_provider_is_typed_error() {
        let err = "claude".parse::<LlmProvider>().unwrap_err();
        assert!(matches!(err, AiError::InvalidProvider(ref p) if p == "claude"));
    }
}
