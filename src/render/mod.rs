//! Rendering of finished snapshots.
//!
//! Renderers only ever see a completed [`LeagueSnapshot`]; they never touch
//! the network or the cache.

pub mod csv;
pub mod html;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::{storage::LeagueSnapshot, OutputFormat, Result};

pub use html::render_instructions;
pub use json::{ErrorBody, StandingsResponse};

/// Format used for every human-facing timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render `snapshot` in the requested encoding.
pub fn render(snapshot: &LeagueSnapshot, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => json::render_json(snapshot),
        OutputFormat::Csv => csv::render_csv(snapshot),
        OutputFormat::Html => html::render_html(snapshot),
    }
}

/// One rendered table row, shared by every encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rank: u32,
    pub entry_id: u64,
    pub entry_name: String,
    pub player_name: String,
    pub total_points: i64,
    pub event_points: i64,
    pub overall_rank: u64,
}

pub(crate) fn rows(snapshot: &LeagueSnapshot) -> Vec<StandingRow> {
    snapshot
        .entries
        .iter()
        .map(|e| StandingRow {
            rank: e.rank,
            entry_id: e.entry_id.as_u64(),
            entry_name: e.entry_name.clone(),
            player_name: e.owner_name.clone(),
            total_points: e.total_points,
            event_points: e.period_points,
            overall_rank: e.global_rank,
        })
        .collect()
}

pub(crate) fn last_updated(snapshot: &LeagueSnapshot) -> String {
    snapshot.last_updated().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests;
