//! Key-value persistence.
//!
//! Everything the app persists is a string value under a string key: the
//! habit list as a JSON blob, the streak as an integer, the last completion
//! as an RFC 3339 timestamp. The typed accessors are provided methods over
//! `get_blob`/`set_blob`, so a backend only implements those two.
//!
//! Unparseable int or timestamp values read as absent rather than erroring;
//! the callers treat missing data as fresh state anyway.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;

use super::data_dir;

/// String-keyed store for opaque blobs and primitives.
pub trait KvStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_blob(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError> {
        Ok(self.get_blob(key)?.and_then(|v| v.parse().ok()))
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StorageError> {
        self.set_blob(key, &value.to_string())
    }

    fn get_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self.get_blob(key)?.and_then(|v| {
            DateTime::parse_from_rfc3339(&v)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        }))
    }

    fn set_timestamp(&mut self, key: &str, value: DateTime<Utc>) -> Result<(), StorageError> {
        self.set_blob(key, &value.to_rfc3339())
    }
}

/// SQLite-backed store.
///
/// A single `kv` table at `~/.config/habitdeck/habitdeck.db`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store, creating the database file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("habitdeck.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(StorageError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_blob(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_blob(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sqlite_blob_round_trip() {
        let mut store = SqliteStore::open_memory().unwrap();
        assert!(store.get_blob("k").unwrap().is_none());
        store.set_blob("k", "hello").unwrap();
        assert_eq!(store.get_blob("k").unwrap().unwrap(), "hello");

        // Upsert overwrites.
        store.set_blob("k", "bye").unwrap();
        assert_eq!(store.get_blob("k").unwrap().unwrap(), "bye");
    }

    #[test]
    fn test_sqlite_open_creates_db_under_home() {
        let home = tempfile::tempdir().unwrap();
        std::env::set_var("HOME", home.path());
        std::env::set_var("HABITDECK_ENV", "dev");

        let mut store = SqliteStore::open().unwrap();
        store.set_blob("k", "v").unwrap();
        assert_eq!(store.get_blob("k").unwrap().unwrap(), "v");
        assert!(home
            .path()
            .join(".config/habitdeck-dev/habitdeck.db")
            .exists());
    }

    #[test]
    fn test_typed_accessors() {
        let mut store = MemoryStore::default();
        store.set_int("n", 42).unwrap();
        assert_eq!(store.get_int("n").unwrap(), Some(42));

        let t = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();
        store.set_timestamp("t", t).unwrap();
        assert_eq!(store.get_timestamp("t").unwrap(), Some(t));
    }

    #[test]
    fn test_unparseable_values_read_as_absent() {
        let mut store = MemoryStore::default();
        store.set_blob("n", "not a number").unwrap();
        store.set_blob("t", "not a timestamp").unwrap();
        assert_eq!(store.get_int("n").unwrap(), None);
        assert_eq!(store.get_timestamp("t").unwrap(), None);
    }
}
