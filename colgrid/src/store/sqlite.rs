//! SQLite store backend with an in-process read cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use super::{StoreBackend, StoreError};

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "colgrid";
const APPLICATION: &str = "colgrid";

/// SQLite-backed store. Keys are strings, values opaque blobs.
pub struct SqliteBackend {
    conn: Connection,
    cache: RefCell<HashMap<String, Vec<u8>>>,
}

impl SqliteBackend {
    /// Open (creating if needed) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            // Missing data dir is the common first-run case.
            let _ = fs::create_dir_all(parent);
        }
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory store (tests, ephemeral hosts).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Default on-disk location for the preference database.
    ///
    /// - Linux: `$XDG_DATA_HOME/colgrid/preferences.db`
    /// - macOS: `~/Library/Application Support/dev.colgrid.colgrid/preferences.db`
    /// - Windows: `%APPDATA%\colgrid\colgrid\data\preferences.db`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.data_dir().join("preferences.db"))
    }
}

impl StoreBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        // Check cache first
        if let Some(value) = self.cache.borrow().get(key) {
            return Ok(Some(value.clone()));
        }

        let mut stmt = self
            .conn
            .prepare("SELECT value FROM preferences WHERE key = ?")?;
        let mut rows = stmt.query([key])?;
        let result = match rows.next()? {
            Some(row) => Some(row.get::<_, Vec<u8>>(0)?),
            None => None,
        };

        if let Some(value) = &result {
            self.cache
                .borrow_mut()
                .insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, &value],
        )?;
        self.cache.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?", [key])?;
        self.cache.borrow_mut().remove(key);
        Ok(())
    }
}
