//! Entry point: parse CLI, load settings and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use fpl_standings::{
    cli::{CacheCmd, Commands, FplStandings},
    commands::{
        cache::{handle_cache_clear, handle_cache_show},
        serve::handle_serve,
        standings::{handle_standings, StandingsParams},
    },
    Settings,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = FplStandings::parse();

    let settings = Settings::load(app.config.as_deref()).context("Failed to load settings")?;
    init_tracing(&settings.log_level);

    match app.command {
        Commands::Get {
            league_id,
            format,
            refresh,
            output,
        } => {
            handle_standings(
                &settings,
                StandingsParams {
                    league_id,
                    format,
                    refresh,
                    output,
                },
            )
            .await?
        }

        Commands::Serve { host, port } => handle_serve(settings, host, port).await?,

        Commands::Cache { cmd } => match cmd {
            CacheCmd::Show { league_id } => handle_cache_show(&settings, league_id.as_deref())?,
            CacheCmd::Clear { league_id } => handle_cache_clear(&settings, league_id.as_deref())?,
        },
    }

    Ok(())
}

/// Log to stderr so rendered output on stdout stays clean. `RUST_LOG` wins
/// over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
