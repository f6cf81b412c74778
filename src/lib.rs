//! FPL League Standings Library
//!
//! Fetches Fantasy Premier League classic-league standings, keeps the last
//! assembled table on disk, and renders it as HTML, JSON or CSV.
//!
//! ## Features
//!
//! - **Standings Assembly**: League roster plus per-entry totals, ranked by total points
//! - **Snapshot Cache**: File or SQLite backed, with TTL freshness and stale fallback
//! - **Rendering**: Self-contained HTML page, JSON document or CSV export
//! - **Refresh Throttling**: Per-session, per-league cooldown on forced refreshes
//! - **Web Mode**: Small HTTP server exposing the same view over query parameters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fpl_standings::{render::render, storage::open_store, Aggregator, LeagueId, OutputFormat, Settings};
//!
//! # async fn example() -> fpl_standings::Result<()> {
//! let settings = Settings::load(None)?;
//! let store = open_store(&settings)?;
//! let aggregator = Aggregator::from_settings(&settings, store)?;
//!
//! let snapshot = aggregator.assemble(LeagueId::new(314), false).await?;
//! let csv = render(&snapshot, OutputFormat::Csv)?;
//! println!("{}", String::from_utf8_lossy(&csv));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your league ID to avoid passing it in every command:
//! ```bash
//! export FPL_LEAGUE_ID=314
//! ```

pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod fpl;
pub mod rate_limit;
pub mod render;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use aggregator::{Aggregator, AggregatorOptions};
pub use cli::types::{EntryId, Gameweek, LeagueId, OutputFormat};
pub use config::{CacheBackend, Settings};
pub use error::{FplError, Result};
pub use rate_limit::{RateDecision, RateLimiter, SessionId};
pub use storage::{LeagueSnapshot, SnapshotStore, StandingEntry};

pub const LEAGUE_ID_ENV_VAR: &str = "FPL_LEAGUE_ID";
