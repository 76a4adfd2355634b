//! Watchlist repository over the `funds` table.

use std::sync::Mutex;

use rusqlite::{params, Connection, ErrorCode, Row};

use crate::errors::StorageError;
use crate::watchlist::model::{NewWatchedFund, WatchedFund};

/// User assigned when the caller does not carry one. Matches the legacy
/// migration default.
pub const DEFAULT_USER_ID: i64 = 1;

/// Repository for the per-user fund watchlist.
///
/// Holds the connection behind a mutex; access is serialized, which is the
/// intended single-writer model for this table.
pub struct FundWatchlistRepository {
    conn: Mutex<Connection>,
}

impl FundWatchlistRepository {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// List a user's watchlist, newest first.
    pub fn list(&self, user_id: i64) -> Result<Vec<WatchedFund>, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, code, name, style, focus, pre_market_time, post_market_time,
                    is_active, created_at, user_id
             FROM funds WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([user_id], row_to_fund)?;
        let funds = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(funds)
    }

    /// Add a fund to a user's watchlist.
    ///
    /// A second insert of the same (user, code) pair surfaces as
    /// [`StorageError::Duplicate`].
    pub fn add(&self, fund: NewWatchedFund) -> Result<WatchedFund, StorageError> {
        let user_id = fund.user_id.unwrap_or(DEFAULT_USER_ID);
        let conn = self.conn.lock().unwrap();

        let result = conn.execute(
            "INSERT INTO funds (code, name, style, focus, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![fund.code, fund.name, fund.style, fund.focus, user_id],
        );

        match result {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                let fund = conn.query_row(
                    "SELECT id, code, name, style, focus, pre_market_time, post_market_time,
                            is_active, created_at, user_id
                     FROM funds WHERE id = ?1",
                    [id],
                    row_to_fund,
                )?;
                Ok(fund)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::Duplicate {
                    user_id,
                    code: fund.code,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a fund from a user's watchlist by code.
    pub fn remove(&self, user_id: i64, code: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM funds WHERE user_id = ?1 AND code = ?2",
            params![user_id, code],
        )?;
        if affected == 0 {
            return Err(StorageError::NotFound(code.to_string()));
        }
        Ok(())
    }
}

fn row_to_fund(row: &Row<'_>) -> rusqlite::Result<WatchedFund> {
    Ok(WatchedFund {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        style: row.get(3)?,
        focus: row.get(4)?,
        pre_market_time: row.get(5)?,
        post_market_time: row.get(6)?,
        is_active: row.get(7)?,
        created_at: row.get(8)?,
        user_id: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn repository() -> FundWatchlistRepository {
        FundWatchlistRepository::new(db::open_in_memory().unwrap())
    }

    fn new_fund(code: &str, user_id: Option<i64>) -> NewWatchedFund {
        NewWatchedFund {
            code: code.to_string(),
            name: "测试基金".to_string(),
            style: Some("均衡".to_string()),
            focus: None,
            user_id,
        }
    }

    #[test]
    fn test_add_and_list() {
        let repo = repository();
        repo.add(new_fund("000001", None)).unwrap();
        repo.add(new_fund("110011", None)).unwrap();

        let funds = repo.list(DEFAULT_USER_ID).unwrap();
        assert_eq!(funds.len(), 2);
        assert!(funds.iter().all(|f| f.is_active));
    }

    #[test]
    fn test_duplicate_insert_is_typed() {
        let repo = repository();
        repo.add(new_fund("000001", None)).unwrap();

        let err = repo.add(new_fund("000001", None)).unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { ref code, .. } if code == "000001"));
    }

    #[test]
    fn test_same_code_for_different_users() {
        let repo = repository();
        repo.add(new_fund("000001", Some(1))).unwrap();
        repo.add(new_fund("000001", Some(2))).unwrap();

        assert_eq!(repo.list(1).unwrap().len(), 1);
        assert_eq!(repo.list(2).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let repo = repository();
        let err = repo.remove(DEFAULT_USER_ID, "999999").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_remove_deletes_row() {
        let repo = repository();
        repo.add(new_fund("000001", None)).unwrap();
        repo.remove(DEFAULT_USER_ID, "000001").unwrap();
        assert!(repo.list(DEFAULT_USER_ID).unwrap().is_empty());
    }
}
