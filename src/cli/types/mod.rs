//! Type-safe wrappers and enums for FPL league data.

pub mod format;
pub mod ids;

pub use format::OutputFormat;
pub use ids::{EntryId, Gameweek, LeagueId};
