//! CSV export of standings.

use super::rows;
use crate::{error::FplError, storage::LeagueSnapshot, Result};

pub const CSV_HEADER: [&str; 6] = [
    "Rank",
    "Team Name",
    "Manager Name",
    "Total Points",
    "Gameweek Points",
    "Overall Rank",
];

/// Header row plus one row per entry; fields with delimiters, quotes or
/// newlines are quoted per RFC 4180.
pub fn render_csv(snapshot: &LeagueSnapshot) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for row in rows(snapshot) {
        writer.write_record([
            row.rank.to_string(),
            row.entry_name,
            row.player_name,
            row.total_points.to_string(),
            row.event_points.to_string(),
            row.overall_rank.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| FplError::Io(err.into_error()))
}

/// Suggested download name for a league's CSV export.
pub fn csv_filename(snapshot: &LeagueSnapshot) -> String {
    format!("league_{}_standings.csv", snapshot.league_id)
}
