//! Storage error types.

use thiserror::Error;

/// Errors from the SQLite storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The (user, code) pair already exists in the watchlist.
    #[error("Fund {code} already on the watchlist of user {user_id}")]
    Duplicate {
        /// Owning user
        user_id: i64,
        /// Fund code
        code: String,
    },

    /// The requested row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An underlying SQLite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
