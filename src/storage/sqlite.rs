//! SQLite-backed snapshot store

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use super::{LeagueSnapshot, SnapshotStore};
use crate::{LeagueId, Result};

/// Database connection manager for cached snapshots
pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
    /// Open (or create) the database file and ensure tables exist
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the cache directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::from_connection(Connection::open(db_path)?)
    }

    /// In-memory database, used by tests
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    pub(crate) fn initialize_schema(&self) -> Result<()> {
        self.conn().execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                league_id INTEGER PRIMARY KEY,
                payload TEXT NOT NULL,
                stored_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // Statements are atomic, so a poisoned lock is still usable
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Milliseconds since the epoch when the record was stored
    fn stored_at(&self, league_id: LeagueId) -> Option<i64> {
        self.conn()
            .query_row(
                "SELECT stored_at FROM snapshots WHERE league_id = ?",
                params![league_id.as_u32()],
                |row| row.get(0),
            )
            .optional()
            .unwrap_or_else(|err| {
                warn!(%league_id, error = %err, "Failed to query snapshot age");
                None
            })
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn read(&self, league_id: LeagueId) -> Option<LeagueSnapshot> {
        let payload: Option<String> = self
            .conn()
            .query_row(
                "SELECT payload FROM snapshots WHERE league_id = ?",
                params![league_id.as_u32()],
                |row| row.get(0),
            )
            .optional()
            .unwrap_or_else(|err| {
                warn!(%league_id, error = %err, "Failed to read snapshot");
                None
            });

        match serde_json::from_str(&payload?) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(%league_id, error = %err, "Ignoring unreadable snapshot row");
                None
            }
        }
    }

    fn write(&self, league_id: LeagueId, snapshot: &LeagueSnapshot) -> Result<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO snapshots (league_id, payload, stored_at)
             VALUES (?, ?, ?)",
            params![
                league_id.as_u32(),
                payload,
                Utc::now().timestamp_millis()
            ],
        )?;
        Ok(())
    }

    fn age(&self, league_id: LeagueId) -> Option<Duration> {
        let stored_at = self.stored_at(league_id)?;
        let elapsed = Utc::now().timestamp_millis().saturating_sub(stored_at).max(0);
        Some(Duration::from_millis(elapsed as u64))
    }

    fn clear(&self, league_id: LeagueId) -> Result<bool> {
        let removed = self.conn().execute(
            "DELETE FROM snapshots WHERE league_id = ?",
            params![league_id.as_u32()],
        )?;
        Ok(removed > 0)
    }

    fn location(&self, league_id: LeagueId) -> String {
        let conn = self.conn();
        match conn.path() {
            Some(path) if !path.is_empty() => format!("{path} (league_id = {league_id})"),
            _ => format!(":memory: (league_id = {league_id})"),
        }
    }
}
