//! The `get` command: assemble a league table and print it.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::{
    commands::resolve_league_id,
    error::FplError,
    render::{render, render_instructions},
    storage::open_store,
    Aggregator, LeagueId, LeagueSnapshot, OutputFormat, RateLimiter, Result, SessionId, Settings,
};

/// Session used for every CLI invocation.
pub const CLI_SESSION: &str = "cli";

/// Parameters for the get command
#[derive(Debug)]
pub struct StandingsParams {
    pub league_id: Option<String>,
    pub format: OutputFormat,
    pub refresh: bool,
    pub output: Option<PathBuf>,
}

/// Gate a forced refresh through the limiter, then assemble.
///
/// Plain requests never touch the limiter.
pub async fn load_standings(
    aggregator: &Aggregator,
    limiter: &RateLimiter,
    session: &SessionId,
    league_id: LeagueId,
    refresh: bool,
) -> Result<LeagueSnapshot> {
    if refresh {
        limiter.check_and_consume(session, league_id).into_result()?;
    }
    aggregator.assemble(league_id, refresh).await
}

/// Handle the get command
pub async fn handle_standings(settings: &Settings, params: StandingsParams) -> Result<()> {
    let league_id = match resolve_league_id(params.league_id.as_deref()) {
        Ok(id) => id,
        Err(err) => {
            // Usage help goes to the same place the table would have
            let message = match &err {
                FplError::InvalidInput { .. } => Some(err.to_string()),
                _ => None,
            };
            emit(
                &render_instructions(message.as_deref())?,
                params.output.as_ref(),
            )?;
            return Err(err);
        }
    };

    let store = open_store(settings)?;
    let aggregator = Aggregator::from_settings(settings, store)?;
    let limiter = RateLimiter::from_settings(settings);

    let snapshot = load_standings(
        &aggregator,
        &limiter,
        &SessionId::new(CLI_SESSION),
        league_id,
        params.refresh,
    )
    .await?;

    if let Some(notice) = &snapshot.stale_notice {
        warn!(league_id = %league_id, "{notice}");
    }

    let body = render(&snapshot, params.format)?;
    emit(&body, params.output.as_ref())?;
    debug!(league_id = %league_id, format = %params.format, bytes = body.len(), "Rendered standings");
    Ok(())
}

fn emit(body: &[u8], output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body)?;
            eprintln!("Wrote {}", path.display()); // tarpaulin::skip
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
