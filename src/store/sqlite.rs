//! Key-value store persisted in the `kv` table of the application database.
//!
//! Each open connection is one context. SQLite bumps `PRAGMA data_version`
//! on a connection whenever *another* connection commits, so a changed
//! version plus a diff against the last snapshot yields the keys other
//! processes touched.

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::{KeyValueStore, StorageEvent, diff_snapshots};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;

pub struct SqliteStore {
    pool: DbPool,
    data_version: i64,
    snapshot: HashMap<String, String>,
}

impl SqliteStore {
    /// Open (and migrate if needed) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::open(path)?;
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        let data_version = read_data_version(&pool.conn)?;
        let snapshot = read_all(&pool.conn)?;
        Ok(Self {
            pool,
            data_version,
            snapshot,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

fn read_data_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA data_version", [], |row| row.get(0))
}

fn read_all(conn: &Connection) -> rusqlite::Result<HashMap<String, String>> {
    let mut stmt = conn.prepare_cached("SELECT key, value FROM kv")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let (k, v) = r?;
        out.insert(k, v);
    }
    Ok(out)
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        self.pool.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        self.snapshot.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        self.snapshot.remove(key);
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT key FROM kv ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for r in rows {
            keys.push(r?);
        }
        Ok(keys)
    }

    fn take_events(&mut self) -> AppResult<Vec<StorageEvent>> {
        let version = read_data_version(&self.pool.conn)?;
        if version == self.data_version {
            return Ok(Vec::new());
        }

        let current = read_all(&self.pool.conn)?;
        let events = diff_snapshots(&self.snapshot, &current);
        self.snapshot = current;
        self.data_version = version;
        Ok(events)
    }
}
