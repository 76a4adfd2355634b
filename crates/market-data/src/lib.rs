//! Fundpulse Market Data Crate
//!
//! Provider-backed fund reference data and market-sentiment indicator feeds
//! for the fundpulse service.
//!
//! # Overview
//!
//! - Full-market fund listing with four-tier fuzzy search ranking
//! - Fund detail assembly: latest NAV, history, manager block, holdings
//! - Sentiment indicator feeds: limit-up pools, north-bound capital flow,
//!   retail hot rank, dragon-tiger institutional trades
//!
//! Providers return typed [`errors::MarketDataError`] values; the
//! [`FundService`] boundary converts them into empty results, which is the
//! contract the HTTP layer exposes.

pub mod errors;
pub mod models;
pub mod provider;
pub mod search;
pub mod service;

pub use models::{
    FundBasicInfo, FundDetail, FundSummary, HoldingItem, HotRankEntry,
    InstitutionNetBuySnapshot, InstitutionTrade, LimitUpEntry, NavPoint, NorthFlowSnapshot,
    MISSING_FIELD,
};

pub use provider::eastmoney::EastMoneyProvider;
pub use provider::{FundDataProvider, SentimentFeedProvider};

pub use search::rank_funds;
pub use service::{FundService, DEFAULT_SEARCH_LIMIT};
