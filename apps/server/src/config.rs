//! Server configuration, read from the environment once at startup.

use fundpulse_ai::LlmConfig;

pub struct Config {
    /// Bind address, `FP_LISTEN_ADDR`.
    pub listen_addr: String,

    /// SQLite database file, `FP_DB_PATH`.
    pub db_path: String,

    /// Key for the news search provider, `TAVILY_API_KEY`. Optional: news
    /// mining degrades to empty results without it.
    pub tavily_api_key: Option<String>,

    /// Resolved LLM backend configuration.
    pub llm: LlmConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            listen_addr: std::env::var("FP_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8001".to_string()),
            db_path: std::env::var("FP_DB_PATH").unwrap_or_else(|_| "funds.db".to_string()),
            tavily_api_key: std::env::var("TAVILY_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            llm: LlmConfig::from_env()?,
        })
    }
}
