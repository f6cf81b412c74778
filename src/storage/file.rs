//! JSON-file snapshot store

use std::{fs, path::PathBuf, time::Duration};

use tracing::{debug, warn};

use super::{LeagueSnapshot, SnapshotStore};
use crate::{
    core::{snapshot_path, try_read_to_string, write_string},
    LeagueId, Result,
};

/// Stores each league as `{dir}/league_{id}.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, league_id: LeagueId) -> PathBuf {
        snapshot_path(&self.dir, league_id)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self, league_id: LeagueId) -> Option<LeagueSnapshot> {
        let path = self.path(league_id);
        let contents = try_read_to_string(&path)?;

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(%league_id, path = %path.display(), error = %err, "Ignoring unreadable cache file");
                None
            }
        }
    }

    fn write(&self, league_id: LeagueId, snapshot: &LeagueSnapshot) -> Result<()> {
        let path = self.path(league_id);
        let json = serde_json::to_string_pretty(snapshot)?;
        write_string(&path, &json)?;
        debug!(%league_id, path = %path.display(), "Wrote snapshot");
        Ok(())
    }

    fn age(&self, league_id: LeagueId) -> Option<Duration> {
        let modified = fs::metadata(self.path(league_id)).ok()?.modified().ok()?;
        // An mtime in the future counts as just written
        Some(modified.elapsed().unwrap_or(Duration::ZERO))
    }

    fn clear(&self, league_id: LeagueId) -> Result<bool> {
        let path = self.path(league_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn location(&self, league_id: LeagueId) -> String {
        self.path(league_id).display().to_string()
    }
}
