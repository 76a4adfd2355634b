//! LLM clients: one trait, two interchangeable REST backends.

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::AiError;

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// System message sent on every chat-completion call.
const OPENAI_SYSTEM_MESSAGE: &str = "You are a professional financial analyst.";

/// Uniform interface over the LLM backends.
///
/// Contract: `generate_content` never fails. A provider-side failure comes
/// back as a human-readable `"Error: …"` string in place of the generated
/// text, so callers cannot programmatically distinguish a report from an
/// embedded failure message. Inherited behavior, kept as-is.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> String;
}

/// Build the client the configuration selects.
///
/// Fails fast when the selected provider's credential is absent; never
/// falls back to a different provider.
pub fn build_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, AiError> {
    match config.provider {
        LlmProvider::Gemini => Ok(Arc::new(GeminiClient::new(config)?)),
        LlmProvider::OpenAi | LlmProvider::OpenAiCompatible => {
            Ok(Arc::new(OpenAiClient::new(config)?))
        }
    }
}

fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn generation_error(detail: impl std::fmt::Display) -> String {
    format!("Error: Could not generate analysis. Details: {}", detail)
}

// ============================================================================
// Gemini
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

/// Client for the Gemini generate-content endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, AiError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| AiError::MissingApiKey("GEMINI_API_KEY".to_string()))?;

        Ok(Self {
            client: http_client(),
            api_key,
            endpoint: config
                .gemini_api_endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            model: config.gemini_model.clone(),
        })
    }

    async fn call(&self, prompt: &str) -> Result<GeminiResponse, String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        response.json().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> String {
        match self.call(prompt).await {
            Ok(response) => {
                let text = response
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|c| c.content)
                    .map(|c| {
                        c.parts
                            .into_iter()
                            .filter_map(|p| p.text)
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();
                if text.is_empty() {
                    return "Error: No text returned from model.".to_string();
                }
                text
            }
            Err(e) => {
                error!("Error generating content with Gemini: {}", e);
                generation_error(e)
            }
        }
    }
}

// ============================================================================
// OpenAI / OpenAI-compatible
// ============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for a chat-completion endpoint, OpenAI or compatible.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, AiError> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| AiError::MissingApiKey("OPENAI_API_KEY".to_string()))?;

        Ok(Self {
            client: http_client(),
            api_key,
            base_url: config
                .openai_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: config.openai_model.clone(),
        })
    }

    async fn call(&self, prompt: &str) -> Result<ChatResponse, String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: OPENAI_SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        response.json().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_content(&self, prompt: &str) -> String {
        match self.call(prompt).await {
            Ok(response) => response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .and_then(|m| m.content)
                .unwrap_or_else(|| "Error: No text returned from model.".to_string()),
            Err(e) => {
                error!("Error generating content with OpenAI: {}", e);
                generation_error(e)
            }
        }
    }
}
