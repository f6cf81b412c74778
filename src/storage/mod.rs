//! Snapshot storage for the FPL standings service
//!
//! The aggregator talks to storage through the [`SnapshotStore`] trait, so
//! freshness policy stays independent of the medium:
//! - `file`: one JSON file per league, freshness from the file's mtime
//! - `sqlite`: embedded key-value table, freshness from a stored timestamp
//! - `models`: the snapshot data structures

pub mod file;
pub mod models;
pub mod sqlite;


use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::{CacheBackend, Settings},
    LeagueId, Result,
};

pub use file::FileSnapshotStore;
pub use models::*;
pub use sqlite::SqliteSnapshotStore;

/// Keyed storage of the last assembled snapshot per league.
///
/// A missing record is never an error; it means "no cache yet".
pub trait SnapshotStore: Send + Sync {
    /// Last written snapshot for `league_id`, if any.
    fn read(&self, league_id: LeagueId) -> Option<LeagueSnapshot>;

    /// Replace the stored snapshot for `league_id` as a whole record.
    fn write(&self, league_id: LeagueId, snapshot: &LeagueSnapshot) -> Result<()>;

    /// Time since the record was last written.
    fn age(&self, league_id: LeagueId) -> Option<Duration>;

    /// Remove the record. Returns whether anything was removed.
    fn clear(&self, league_id: LeagueId) -> Result<bool>;

    /// Human-readable location of the record, for diagnostics.
    fn location(&self, league_id: LeagueId) -> String;

    fn is_fresh(&self, league_id: LeagueId, ttl: Duration) -> bool {
        self.age(league_id).is_some_and(|age| age < ttl)
    }
}

/// Open the store selected by `settings.cache_backend`.
pub fn open_store(settings: &Settings) -> Result<Arc<dyn SnapshotStore>> {
    let dir = settings.resolved_cache_dir();
    let store: Arc<dyn SnapshotStore> = match settings.cache_backend {
        CacheBackend::File => Arc::new(FileSnapshotStore::new(dir)),
        CacheBackend::Sqlite => Arc::new(SqliteSnapshotStore::open(&dir.join("snapshots.db"))?),
    };
    Ok(store)
}
