//! Fundpulse SQLite Storage Crate
//!
//! Persists the per-user fund watchlist in a single `funds` table keyed by
//! an autoincrement id with composite uniqueness on (user_id, code), and
//! carries the one-off schema migration that rewrote the legacy
//! globally-unique-code shape into that form.

pub mod db;
pub mod errors;
pub mod watchlist;

pub use db::{migrate_funds_schema, open, open_in_memory};
pub use errors::StorageError;
pub use watchlist::{FundWatchlistRepository, NewWatchedFund, WatchedFund, DEFAULT_USER_ID};
