//! News mining analyst: fetch recent market news and run an LLM first pass.

use std::sync::Arc;

use log::debug;

use fundpulse_ai::LlmClient;
use fundpulse_news::{NewsItem, NewsSearchClient};

/// Rendered when there was nothing to analyze; travels into the final
/// report prompt in place of the first-pass summary.
pub const NO_NEWS_PLACEHOLDER: &str = "(无新闻数据)";

/// Content snippet length fed to the first pass, in characters.
const SNIPPET_CHARS: usize = 120;

pub struct NewsMiner {
    client: Arc<NewsSearchClient>,
    api_key: String,
    llm: Arc<dyn LlmClient>,
}

impl NewsMiner {
    /// `api_key` may be empty; fetching then degrades to no news.
    pub fn new(client: Arc<NewsSearchClient>, api_key: String, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            api_key,
            llm,
        }
    }

    /// Fetch recent macro market news. Failures and a missing key both come
    /// back as an empty list from the news adapter.
    pub async fn fetch_recent_news(&self, limit: usize) -> Vec<NewsItem> {
        let items = self
            .client
            .search_market_sentiment(&self.api_key, limit)
            .await;
        debug!("News miner fetched {} items", items.len());
        items
    }

    /// First-pass LLM screening: condense the raw items into the few core
    /// drivers the final report reasons over. Skips the LLM entirely when
    /// there is nothing to read.
    pub async fn analyze_news_sentiment(&self, items: &[NewsItem]) -> String {
        if items.is_empty() {
            return NO_NEWS_PLACEHOLDER.to_string();
        }

        let digest = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let snippet = item
                    .content
                    .as_deref()
                    .map(|c| c.chars().take(SNIPPET_CHARS).collect::<String>())
                    .unwrap_or_default();
                if snippet.is_empty() {
                    format!("{}. {}", i + 1, item.title)
                } else {
                    format!("{}. {}：{}", i + 1, item.title, snippet)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "你是财经新闻分析师。请从以下新闻中筛选出对明日A股最可能产生影响的核心驱动事件，\
按板块归纳，最多输出5条；每条一句话，并标注（利好/利空/中性）。只依据给出的新闻内容，不要编造。\n\n{}",
            digest
        );

        self.llm.generate_content(&prompt).await
    }
}
