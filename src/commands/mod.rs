//! Command implementations for the FPL standings CLI

pub mod cache;
pub mod serve;
pub mod standings;


use crate::{error::FplError, LeagueId, Result, LEAGUE_ID_ENV_VAR};

/// Resolve league ID from the given text or the environment variable.
///
/// Text that is present but not a valid ID is an `InvalidInput` error; the
/// environment is only consulted when no value was given at all.
pub fn resolve_league_id(league_id: Option<&str>) -> Result<LeagueId> {
    match league_id {
        Some(raw) => raw.parse(),
        None => std::env::var(LEAGUE_ID_ENV_VAR)
            .map_err(|_| FplError::MissingLeagueId {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
            })?
            .parse(),
    }
}
