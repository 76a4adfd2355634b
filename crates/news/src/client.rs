//! Tavily-style news search client.

use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::NewsError;
use crate::models::NewsItem;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Fixed query for the macro market-sentiment sweep.
const MARKET_SENTIMENT_QUERY: &str = "A股 市场情绪 宏观分析 最新";

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    topic: &'static str,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<NewsItem>,
}

/// News search client.
///
/// The API key travels with each call rather than the client because the
/// HTTP surface accepts a per-request key in the POST body.
pub struct NewsSearchClient {
    client: Client,
    base_url: String,
}

impl Default for NewsSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsSearchClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint, for self-hosted compatible deployments.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn search(
        &self,
        query: &str,
        api_key: &str,
        max_results: usize,
    ) -> Result<Vec<NewsItem>, NewsError> {
        if api_key.is_empty() {
            return Err(NewsError::MissingApiKey);
        }

        let request = SearchRequest {
            api_key,
            query,
            search_depth: "advanced",
            topic: "news",
            max_results,
            include_answer: false,
            include_raw_content: false,
            include_images: false,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Provider(format!("HTTP {}", status)));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Provider(format!("Failed to parse response: {}", e)))?;

        debug!("News search '{}' returned {} items", query, body.results.len());
        Ok(body.results)
    }

    /// Search recent news for a query.
    ///
    /// A missing key or any provider failure yields an empty list.
    pub async fn search_fund_news(
        &self,
        query: &str,
        api_key: &str,
        max_results: usize,
    ) -> Vec<NewsItem> {
        match self.search(query, api_key, max_results).await {
            Ok(items) => items,
            Err(e) => {
                warn!("News search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Search current macro market-sentiment coverage with a fixed query.
    pub async fn search_market_sentiment(
        &self,
        api_key: &str,
        max_results: usize,
    ) -> Vec<NewsItem> {
        match self.search(MARKET_SENTIMENT_QUERY, api_key, max_results).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Market sentiment search failed: {}", e);
                Vec::new()
            }
        }
    }
}
