//! Watchlist row models.

use serde::{Deserialize, Serialize};

/// A fund on a user's watchlist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WatchedFund {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub style: Option<String>,
    pub focus: Option<String>,
    pub pre_market_time: Option<String>,
    pub post_market_time: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub user_id: i64,
}

/// Insert payload for a new watchlist entry.
#[derive(Clone, Debug, Deserialize)]
pub struct NewWatchedFund {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}
