//! Provider trait definitions.
//!
//! Two seams: fund reference data (listing, NAV, holdings) and the
//! market-sentiment indicator feeds. A provider may implement either or both;
//! the service layer and the sentiment analysts only see the traits.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{
    FundBasicInfo, FundSummary, HoldingItem, HotRankEntry, InstitutionNetBuySnapshot,
    LimitUpEntry, NavPoint, NorthFlowSnapshot,
};

/// Trait for fund reference-data providers.
#[async_trait]
pub trait FundDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "EASTMONEY".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the full-market fund listing (code, name, type, pinyin).
    async fn list_funds(&self) -> Result<Vec<FundSummary>, MarketDataError>;

    /// Fetch the manager / size / rating block for a fund.
    async fn fund_basic_info(&self, code: &str) -> Result<FundBasicInfo, MarketDataError>;

    /// Fetch the unit-NAV series for a fund, newest first.
    async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>, MarketDataError>;

    /// Fetch the fund's top stock holdings.
    async fn fund_holdings(&self, code: &str) -> Result<Vec<HoldingItem>, MarketDataError>;
}

/// Trait for market-sentiment indicator feeds.
///
/// Each operation is an independent snapshot fetch; there is no shared state
/// between them and callers invoke them sequentially.
#[async_trait]
pub trait SentimentFeedProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "EASTMONEY".
    fn id(&self) -> &'static str;

    /// Today's limit-up pool.
    async fn limit_up_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError>;

    /// Today's failed-limit (broken board) pool.
    async fn failed_limit_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError>;

    /// Yesterday's limit-up pool with today's performance, for the
    /// follow-through premium.
    async fn yesterday_limit_up_pool(&self) -> Result<Vec<LimitUpEntry>, MarketDataError>;

    /// North-bound capital daily net inflow.
    async fn north_flow(&self) -> Result<NorthFlowSnapshot, MarketDataError>;

    /// Retail popularity ranking, hottest first, at most `limit` rows.
    async fn hot_rank(&self, limit: usize) -> Result<Vec<HotRankEntry>, MarketDataError>;

    /// Institutional net buys from the dragon-tiger list, largest first,
    /// at most `limit` rows.
    async fn institution_net_buy(
        &self,
        limit: usize,
    ) -> Result<InstitutionNetBuySnapshot, MarketDataError>;
}
