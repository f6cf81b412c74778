//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::OutputFormat;

#[derive(Debug, Parser)]
#[clap(
    name = "fpl-standings",
    version,
    about = "Fantasy Premier League classic-league standings"
)]
pub struct FplStandings {
    /// YAML settings file (defaults to `fpl-standings.yaml` if present).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the standings of a league
    Get {
        /// League ID (or set `FPL_LEAGUE_ID` env var).
        ///
        /// Kept as text so an invalid value can be answered with usage help.
        #[clap(long, short)]
        league_id: Option<String>,

        /// Output encoding.
        #[clap(long, short, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Bypass the cache and fetch from FPL.
        #[clap(long)]
        refresh: bool,

        /// Write to this file instead of stdout.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Serve standings over HTTP
    Serve {
        /// Address to bind (overrides settings).
        #[clap(long)]
        host: Option<String>,

        /// Port to bind (overrides settings).
        #[clap(long, short)]
        port: Option<u16>,
    },

    /// Inspect or clear cached snapshots
    Cache {
        #[clap(subcommand)]
        cmd: CacheCmd,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheCmd {
    /// Show where a league's snapshot lives and how old it is
    Show {
        /// League ID (or set `FPL_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<String>,
    },

    /// Delete a league's snapshot
    Clear {
        /// League ID (or set `FPL_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<String>,
    },
}
