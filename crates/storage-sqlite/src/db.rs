//! Database initialization and the funds schema migration.

use log::info;
use rusqlite::Connection;

use crate::errors::StorageError;

/// Current `funds` table shape: codes are unique per user, not globally.
const CREATE_FUNDS_TABLE: &str = "
    CREATE TABLE funds (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL,
        name TEXT NOT NULL,
        style TEXT,
        focus TEXT,
        pre_market_time TEXT,
        post_market_time TEXT,
        is_active BOOLEAN DEFAULT 1,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        user_id INTEGER,
        UNIQUE(user_id, code)
    )";

/// Open (or create) the database file and bring the schema up to date.
pub fn open(path: &str) -> Result<Connection, StorageError> {
    let mut conn = Connection::open(path)?;
    migrate_funds_schema(&mut conn)?;
    Ok(conn)
}

/// Open an in-memory database with the current schema.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let mut conn = Connection::open_in_memory()?;
    migrate_funds_schema(&mut conn)?;
    Ok(conn)
}

/// Rewrite the `funds` table to the per-user uniqueness shape.
///
/// Legacy databases carried `UNIQUE` on `code` alone; the rewrite runs as
/// one transaction: rename old table, create new, copy rows, drop old.
/// Legacy rows without a `user_id` column are assigned to user 1. A fresh
/// database just gets the table created; an already-migrated one is left
/// untouched.
pub fn migrate_funds_schema(conn: &mut Connection) -> Result<(), StorageError> {
    if !table_exists(conn, "funds")? {
        conn.execute(CREATE_FUNDS_TABLE, [])?;
        return Ok(());
    }
    if has_composite_unique(conn)? {
        return Ok(());
    }

    info!("Migrating funds table to per-user uniqueness");
    let tx = conn.transaction()?;

    tx.execute("ALTER TABLE funds RENAME TO funds_old", [])?;
    tx.execute(CREATE_FUNDS_TABLE, [])?;

    let has_user_id = {
        let mut stmt = tx.prepare("PRAGMA table_info(funds_old)")?;
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;
        columns.iter().any(|c| c == "user_id")
    };

    if has_user_id {
        tx.execute(
            "INSERT INTO funds (id, code, name, style, focus, pre_market_time, post_market_time, is_active, created_at, user_id)
             SELECT id, code, name, style, focus, pre_market_time, post_market_time, is_active, created_at, user_id
             FROM funds_old",
            [],
        )?;
    } else {
        tx.execute(
            "INSERT INTO funds (id, code, name, style, focus, pre_market_time, post_market_time, is_active, created_at, user_id)
             SELECT id, code, name, style, focus, pre_market_time, post_market_time, is_active, created_at, 1
             FROM funds_old",
            [],
        )?;
    }

    tx.execute("DROP TABLE funds_old", [])?;
    tx.commit()?;

    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, StorageError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Detect the migrated shape by looking for a unique index spanning both
/// `user_id` and `code`.
fn has_composite_unique(conn: &Connection) -> Result<bool, StorageError> {
    let mut index_names = Vec::new();
    {
        let mut stmt = conn.prepare("PRAGMA index_list(funds)")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, i64>(2)?))
        })?;
        for row in rows {
            let (name, unique) = row?;
            if unique != 0 {
                index_names.push(name);
            }
        }
    }

    for name in index_names {
        let mut stmt = conn.prepare(&format!("PRAGMA index_info({})", name))?;
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(2))?
            .collect::<Result<_, _>>()?;
        if columns.contains(&"user_id".to_string()) && columns.contains(&"code".to_string()) {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE funds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                style TEXT,
                focus TEXT,
                pre_market_time TEXT,
                post_market_time TEXT,
                is_active BOOLEAN DEFAULT 1,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO funds (code, name, style) VALUES ('000001', '华夏成长混合', '均衡')",
            [],
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_fresh_database_gets_current_schema() {
        let conn = open_in_memory().unwrap();
        assert!(has_composite_unique(&conn).unwrap());
    }

    #[test]
    fn test_migration_assigns_legacy_rows_to_user_one() {
        let mut conn = legacy_db();
        migrate_funds_schema(&mut conn).unwrap();

        let (code, user_id): (String, i64) = conn
            .query_row("SELECT code, user_id FROM funds", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(code, "000001");
        assert_eq!(user_id, 1);
    }

    #[test]
    fn test_migration_drops_global_code_uniqueness() {
        let mut conn = legacy_db();
        migrate_funds_schema(&mut conn).unwrap();

        // same code for two users is now legal
        conn.execute(
            "INSERT INTO funds (code, name, user_id) VALUES ('000001', '华夏成长混合', 2)",
            [],
        )
        .unwrap();

        // but not twice for the same user
        let dup = conn.execute(
            "INSERT INTO funds (code, name, user_id) VALUES ('000001', '华夏成长混合', 1)",
            [],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_migration_is_idempotent() {
        let mut conn = legacy_db();
        migrate_funds_schema(&mut conn).unwrap();
        migrate_funds_schema(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM funds", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
