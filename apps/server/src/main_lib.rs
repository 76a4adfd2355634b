//! Application state and startup wiring.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use fundpulse_ai::build_llm_client;
use fundpulse_market_data::provider::{FundDataProvider, SentimentFeedProvider};
use fundpulse_market_data::{EastMoneyProvider, FundService};
use fundpulse_news::NewsSearchClient;
use fundpulse_sentiment::SentimentDashboard;
use fundpulse_storage_sqlite::{self as storage, FundWatchlistRepository};

use crate::config::Config;

pub struct AppState {
    pub fund_service: FundService,
    pub news_client: Arc<NewsSearchClient>,
    pub dashboard: SentimentDashboard,
    pub watchlist: FundWatchlistRepository,
}

pub fn init_tracing() {
    let log_format = std::env::var("FP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    // The LLM client is built at startup so a missing credential fails the
    // process instead of the first report.
    let llm = build_llm_client(&config.llm)?;

    let provider = Arc::new(EastMoneyProvider::new());
    let fund_service = FundService::new(provider.clone() as Arc<dyn FundDataProvider>);

    let news_client = Arc::new(NewsSearchClient::new());
    let dashboard = SentimentDashboard::new(
        llm,
        provider as Arc<dyn SentimentFeedProvider>,
        news_client.clone(),
        config.tavily_api_key.clone().unwrap_or_default(),
    );

    let conn = storage::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let watchlist = FundWatchlistRepository::new(conn);

    Ok(Arc::new(AppState {
        fund_service,
        news_client,
        dashboard,
        watchlist,
    }))
}
