//! The `cache` subcommands.

use crate::{commands::resolve_league_id, storage::open_store, Result, Settings};

/// Print where a league's snapshot lives, how old it is and whether it is fresh.
pub fn handle_cache_show(settings: &Settings, league_id: Option<&str>) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let store = open_store(settings)?;
    let location = store.location(league_id);

    let Some(snapshot) = store.read(league_id) else {
        println!("No cached snapshot for league {league_id} ({location})"); // tarpaulin::skip
        return Ok(());
    };

    let age_secs = store.age(league_id).map(|a| a.as_secs()).unwrap_or_default();
    let fresh = store.is_fresh(league_id, settings.cache_ttl());

    // tarpaulin::skip - console output
    println!("League:       {} ({league_id})", snapshot.league_name);
    println!("Location:     {location}");
    println!("Gameweek:     {}", snapshot.current_gameweek);
    println!("Entries:      {}", snapshot.entries.len());
    println!(
        "Last updated: {}",
        snapshot.last_updated().format(crate::render::TIMESTAMP_FORMAT)
    );
    println!(
        "Age:          {age_secs}s ({})",
        if fresh { "fresh" } else { "expired" }
    );
    Ok(())
}

/// Remove a league's snapshot.
pub fn handle_cache_clear(settings: &Settings, league_id: Option<&str>) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let store = open_store(settings)?;

    if store.clear(league_id)? {
        println!("Removed cached snapshot for league {league_id}"); // tarpaulin::skip
    } else {
        println!("Nothing cached for league {league_id}"); // tarpaulin::skip
    }
    Ok(())
}
