//! JSON encoding of standings and error bodies.

use serde::{Deserialize, Serialize};

use super::{last_updated, rows, StandingRow};
use crate::{storage::LeagueSnapshot, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueHeader {
    pub id: u32,
    pub name: String,
    pub current_gameweek: u16,
}

/// Public JSON shape of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub league: LeagueHeader,
    pub standings: Vec<StandingRow>,
    pub last_updated: String,
    /// Present only when serving stale data after a failed refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&LeagueSnapshot> for StandingsResponse {
    fn from(snapshot: &LeagueSnapshot) -> Self {
        Self {
            league: LeagueHeader {
                id: snapshot.league_id.as_u32(),
                name: snapshot.league_name.clone(),
                current_gameweek: snapshot.current_gameweek.as_u16(),
            },
            standings: rows(snapshot),
            last_updated: last_updated(snapshot),
            error: snapshot.stale_notice.clone(),
        }
    }
}

/// `{"error": true, "message": ..., "retry_after": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn rate_limited(message: impl Into<String>, retry_after_secs: u64) -> Self {
        Self {
            retry_after: Some(retry_after_secs),
            ..Self::new(message)
        }
    }
}

pub fn render_json(snapshot: &LeagueSnapshot) -> Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(&StandingsResponse::from(snapshot))?;
    out.push(b'\n');
    Ok(out)
}
