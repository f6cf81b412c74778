//! Response payloads from the FPL API.
//!
//! Only the fields this service reads are modelled; everything else in the
//! (large) upstream documents is ignored.

use serde::{Deserialize, Serialize};

use crate::EntryId;


/// Root of `/bootstrap-static/`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// One gameweek descriptor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    pub id: u16,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub finished: bool,
}

/// Root of `/leagues-classic/{id}/standings/`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueStandings {
    pub league: LeagueInfo,
    #[serde(default)]
    pub standings: Option<StandingsPage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueInfo {
    pub name: String,
}

/// One page of league members
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StandingsPage {
    #[serde(default)]
    pub has_next: bool,
    /// Absent when the league doesn't exist or isn't a classic league.
    #[serde(default)]
    pub results: Option<Vec<RosterMember>>,
}

/// A league member as listed on the standings page.
///
/// The page also carries a `total`, but it lags behind the entry endpoint
/// during live gameweeks, so it is deliberately not read.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterMember {
    pub entry: EntryId,
    pub entry_name: String,
    pub player_name: String,
}

/// Root of `/entry/{id}/`; summary fields are null before an entry's first gameweek.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntryDetail {
    #[serde(default)]
    pub summary_overall_points: Option<i64>,
    #[serde(default)]
    pub summary_event_points: Option<i64>,
    #[serde(default)]
    pub summary_overall_rank: Option<u64>,
}
