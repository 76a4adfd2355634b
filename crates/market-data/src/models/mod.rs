//! Data models for the market data crate.

mod fund;
mod indicators;

pub use fund::{FundBasicInfo, FundDetail, FundSummary, HoldingItem, NavPoint, MISSING_FIELD};
pub use indicators::{
    HotRankEntry, InstitutionNetBuySnapshot, InstitutionTrade, LimitUpEntry, NorthFlowSnapshot,
};
