//! Storage layer for the sprout hydration tracker.
//!
//! Provides a small key-value store on top of `rusqlite` and implements
//! [`HydrationStore`] with it.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! A single `kv` table maps a text key to a JSON value. Each write replaces
//! the whole value (last write wins). Keys in use are the constants in
//! [`sprout_core::store`].
//!
//! ## Timestamp Format
//!
//! `updated_at` is stored as TEXT in ISO 8601 format (e.g., `2024-01-15T10:30:00Z`).
//!
//! ## Retention
//!
//! Nothing is ever pruned here. The recommendation engine keeps its own
//! 90-day window in memory; the two bounds are independent.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use sprout_core::store::{HISTORY_KEY, PARAMS_KEY, PROFILE_KEY, STREAK_KEY};
use sprout_core::{HydrationHistory, HydrationStore, ModelParams, UserProfile};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored value could not be encoded or decoded.
    #[error("invalid value for key {key}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- value: JSON document, replaced wholesale on every write
            -- updated_at: ISO 8601 format (e.g., '2024-01-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads and decodes the value stored under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|source| DbError::Json {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    /// Encodes `value` and stores it under `key`, replacing any previous value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let raw = serde_json::to_string(value).map_err(|source| DbError::Json {
            key: key.to_string(),
            source,
        })?;
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, raw, now_timestamp()],
        )?;
        tracing::debug!(key, "stored value");
        Ok(())
    }

}

impl HydrationStore for Database {
    type Error = DbError;

    fn load_history(&self) -> Result<HydrationHistory, DbError> {
        Ok(self.get(HISTORY_KEY)?.unwrap_or_default())
    }

    fn save_history(&mut self, history: &HydrationHistory) -> Result<(), DbError> {
        self.set(HISTORY_KEY, history)
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, DbError> {
        self.get(PROFILE_KEY)
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), DbError> {
        self.set(PROFILE_KEY, profile)
    }

    fn load_params(&self) -> Result<Option<ModelParams>, DbError> {
        self.get(PARAMS_KEY)
    }

    fn save_params(&mut self, params: &ModelParams) -> Result<(), DbError> {
        self.set(PARAMS_KEY, params)
    }

    fn save_streak(&mut self, streak: u32) -> Result<(), DbError> {
        self.set(STREAK_KEY, &streak)
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
