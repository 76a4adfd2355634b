//! Fundpulse AI Crate
//!
//! Uniform `generate_content(prompt) -> text` interface over two
//! interchangeable LLM backends: the Gemini generate-content endpoint and an
//! OpenAI-compatible chat-completion endpoint. The backend is selected by an
//! explicit [`LlmConfig`] built once at startup.
//!
//! Construction fails fast when the selected provider's credential is
//! missing. Generation, by contrast, never fails: provider-side errors are
//! absorbed into the returned text as a `"Error: …"` message, so downstream
//! report content can silently carry a failure. That asymmetry is inherited
//! from the system this replaces and is documented rather than fixed.

mod client;
mod config;
mod error;

pub use client::{build_llm_client, GeminiClient, LlmClient, OpenAiClient};
pub use config::{LlmConfig, LlmProvider, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_MODEL};
pub use error::AiError;
