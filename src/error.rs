//! Error types for the FPL standings service

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FplError>;

#[derive(Error, Debug)]
pub enum FplError {
    /// Network failure or timeout while talking to the FPL API.
    #[error("Failed to reach the FPL API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The FPL API answered with a non-success status.
    #[error("FPL API returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// A well-formed response that lacks the structure we need.
    #[error("Unexpected FPL data: {message}")]
    Aggregation { message: String },

    #[error("Invalid league ID: {input:?} (league IDs are numeric)")]
    InvalidInput { input: String },

    #[error("Please wait {retry_after_secs} seconds before refreshing this league again")]
    RateLimited { retry_after_secs: u64 },

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl FplError {
    pub fn aggregation(message: impl Into<String>) -> Self {
        FplError::Aggregation {
            message: message.into(),
        }
    }

    /// Errors raised while talking to upstream; these fall back to a stale snapshot.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            FplError::Transport(_) | FplError::UpstreamStatus { .. } | FplError::Aggregation { .. }
        )
    }
}

impl From<figment::Error> for FplError {
    fn from(err: figment::Error) -> Self {
        FplError::Config(Box::new(err))
    }
}
