use crate::{fpl::types::Event, storage::StandingEntry, Gameweek};


/// Pick the active gameweek from the event list.
///
/// First event flagged `is_current`, else the first one not yet finished,
/// else gameweek 1. List order decides between multiple candidates.
pub fn select_current_gameweek(events: &[Event]) -> Gameweek {
    events
        .iter()
        .find(|e| e.is_current)
        .or_else(|| events.iter().find(|e| !e.finished))
        .map(|e| Gameweek::new(e.id))
        .unwrap_or_default()
}

/// Order entries by total points (highest first) and assign ranks 1..N.
///
/// The sort is stable, so entries with equal totals keep their roster order.
pub fn rank_entries(mut entries: Vec<StandingEntry>) -> Vec<StandingEntry> {
    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx as u32 + 1;
    }
    entries
}
