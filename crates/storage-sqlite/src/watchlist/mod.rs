//! Fund watchlist storage.

mod model;
mod repository;

pub use model::{NewWatchedFund, WatchedFund};
pub use repository::{FundWatchlistRepository, DEFAULT_USER_ID};
