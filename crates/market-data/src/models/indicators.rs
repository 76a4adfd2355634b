//! Raw market-sentiment indicator feeds.
//!
//! These are the provider-shaped inputs the sentiment analysts aggregate;
//! the assembled per-analyst payloads live in the sentiment crate.

use serde::{Deserialize, Serialize};

/// One entry from a limit-up (or failed-limit) pool snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitUpEntry {
    /// Stock code (e.g., "600519")
    pub code: String,

    /// Stock name
    pub name: String,

    /// Percent change at snapshot time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_change: Option<f64>,

    /// Consecutive limit-up boards; 1 for a first board
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consecutive_boards: Option<u32>,
}

/// One row of the retail hot-stock popularity ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotRankEntry {
    /// Popularity rank, 1 = hottest
    pub rank: u32,

    /// Stock code
    pub code: String,

    /// Stock name, absent when the quote join failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Percent change for the ranked stock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_change: Option<f64>,
}

/// North-bound (cross-border) capital flow snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NorthFlowSnapshot {
    /// Daily net inflow in 100M CNY (亿元); passed through as-is, including 0
    pub net_inflow: Option<f64>,

    /// Trade date the figure belongs to, as reported by the provider
    pub date: Option<String>,
}

/// One institutional net-buy row from the dragon-tiger list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstitutionTrade {
    pub code: String,
    pub name: String,

    /// Net buy amount in 100M CNY (亿元)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_buy: Option<f64>,
}

/// Institutional net-buy snapshot with its reporting date.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InstitutionNetBuySnapshot {
    /// Trade date of the rows, absent when the provider returned none
    pub date: Option<String>,
    pub entries: Vec<InstitutionTrade>,
}
