//! Unit tests for the presenters

use super::*;
use crate::{
    render::csv::{csv_filename, CSV_HEADER},
    storage::StandingEntry,
    EntryId, Gameweek, LeagueId,
};
use chrono::{TimeZone, Utc};

fn entry(rank: u32, id: u64, team: &str, owner: &str, total: i64) -> StandingEntry {
    StandingEntry {
        rank,
        entry_id: EntryId::new(id),
        entry_name: team.to_string(),
        owner_name: owner.to_string(),
        total_points: total,
        period_points: total / 10,
        global_rank: id * 1000,
    }
}

fn snapshot() -> LeagueSnapshot {
    LeagueSnapshot {
        league_id: LeagueId::new(314),
        league_name: "Office <League>".to_string(),
        current_gameweek: Gameweek::new(9),
        entries: vec![
            entry(1, 2, "Saka, Potatoes", "Bob \"The Boss\" Smith", 80),
            entry(2, 1, "Plain FC", "Alice", 50),
        ],
        generated_at: Utc.with_ymd_and_hms(2025, 10, 18, 15, 0, 0).unwrap(),
        cached_at: Some(Utc.with_ymd_and_hms(2025, 10, 18, 15, 0, 2).unwrap()),
        stale_notice: None,
    }
}

#[test]
fn test_json_shape() {
    let bytes = render(&snapshot(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["league"]["id"], 314);
    assert_eq!(value["league"]["name"], "Office <League>");
    assert_eq!(value["league"]["current_gameweek"], 9);
    assert_eq!(value["last_updated"], "2025-10-18 15:00:02 UTC");
    assert!(value.get("error").is_none());

    let first = &value["standings"][0];
    assert_eq!(first["rank"], 1);
    assert_eq!(first["entry_id"], 2);
    assert_eq!(first["entry_name"], "Saka, Potatoes");
    assert_eq!(first["player_name"], "Bob \"The Boss\" Smith");
    assert_eq!(first["total_points"], 80);
    assert_eq!(first["event_points"], 8);
    assert_eq!(first["overall_rank"], 2000);
}

#[test]
fn test_json_round_trip() {
    let snapshot = snapshot().into_stale("upstream unavailable");
    let bytes = render(&snapshot, OutputFormat::Json).unwrap();

    let decoded: StandingsResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, StandingsResponse::from(&snapshot));
    assert_eq!(decoded.error.as_deref(), Some("upstream unavailable"));
}

#[test]
fn test_last_updated_falls_back_to_generated_at() {
    let mut snapshot = snapshot();
    snapshot.cached_at = None;
    let response = StandingsResponse::from(&snapshot);
    assert_eq!(response.last_updated, "2025-10-18 15:00:00 UTC");
}

#[test]
fn test_csv_rows_and_quoting() {
    let snapshot = snapshot();
    let bytes = render(&snapshot, OutputFormat::Csv).unwrap();

    let mut reader = ::csv::Reader::from_reader(bytes.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADER);

    let records: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    // Header plus one row per entry
    assert_eq!(records.len() + 1, snapshot.entries.len() + 1);
    assert_eq!(&records[0][1], "Saka, Potatoes");
    assert_eq!(&records[0][2], "Bob \"The Boss\" Smith");
    assert_eq!(&records[1][0], "2");
    assert_eq!(&records[1][5], "1000");

    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("Rank,Team Name,Manager Name,Total Points,Gameweek Points,Overall Rank\n"));
    assert!(text.contains("\"Saka, Potatoes\""));
    assert!(text.contains("\"Bob \"\"The Boss\"\" Smith\""));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_csv_filename() {
    assert_eq!(csv_filename(&snapshot()), "league_314_standings.csv");
}

#[test]
fn test_html_contains_table_and_escapes() {
    let bytes = render(&snapshot(), OutputFormat::Html).unwrap();
    let html = String::from_utf8(bytes).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Office &lt;League&gt;"));
    assert!(!html.contains("Office <League>"));
    assert!(html.contains("Gameweek 9"));
    assert!(html.contains("2025-10-18 15:00:02 UTC"));
    assert!(html.contains("?league=314&amp;refresh=1"));
    assert!(html.contains("Plain FC"));
    assert_eq!(html.matches("<tr><td").count(), 2);
    assert!(!html.contains("class=\"stale\""));
}

#[test]
fn test_html_shows_stale_banner() {
    let bytes = render(
        &snapshot().into_stale("Could not refresh standings"),
        OutputFormat::Html,
    )
    .unwrap();
    let html = String::from_utf8(bytes).unwrap();
    assert!(html.contains("<div class=\"stale\">Could not refresh standings</div>"));
}

#[test]
fn test_instructions_page() {
    let plain = String::from_utf8(render_instructions(None).unwrap()).unwrap();
    assert!(plain.contains("League ID"));
    assert!(!plain.contains("class=\"error\""));

    let with_error =
        String::from_utf8(render_instructions(Some("Invalid league ID: \"abc\"")).unwrap()).unwrap();
    assert!(with_error.contains("<div class=\"error\">"));
    assert!(with_error.contains("Invalid league ID"));
}

#[test]
fn test_error_body_shapes() {
    let body = serde_json::to_value(ErrorBody::new("boom")).unwrap();
    assert_eq!(body, serde_json::json!({"error": true, "message": "boom"}));

    let limited = serde_json::to_value(ErrorBody::rate_limited("slow down", 42)).unwrap();
    assert_eq!(
        limited,
        serde_json::json!({"error": true, "message": "slow down", "retry_after": 42})
    );
}
