//! Data structures for assembled league standings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntryId, Gameweek, LeagueId};

/// One participant's row in a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    /// 1-based position within the snapshot, recomputed on every assembly.
    pub rank: u32,
    pub entry_id: EntryId,
    pub entry_name: String,
    pub owner_name: String,
    /// Cumulative score from the entry detail endpoint.
    pub total_points: i64,
    /// Score for the current gameweek only.
    pub period_points: i64,
    /// Overall FPL rank outside this league.
    pub global_rank: u64,
}

/// The full assembled, ranked state of a league at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub league_id: LeagueId,
    pub league_name: String,
    pub current_gameweek: Gameweek,
    pub entries: Vec<StandingEntry>,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub cached_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_notice: Option<String>,
}

impl LeagueSnapshot {
    /// When the data was last known good: persistence time if written, else assembly time.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.cached_at.unwrap_or(self.generated_at)
    }

    pub fn is_stale(&self) -> bool {
        self.stale_notice.is_some()
    }

    /// Mark this snapshot as served in place of a failed refresh.
    pub fn into_stale(mut self, notice: impl Into<String>) -> Self {
        self.stale_notice = Some(notice.into());
        self
    }
}
