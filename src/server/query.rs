//! Query string and cookie parsing for the standings page.

use axum::http::{header::COOKIE, HeaderMap};
use serde::Deserialize;

use crate::{OutputFormat, SessionId};

/// Cookie carrying the rate-limiting session.
pub const SESSION_COOKIE: &str = "fpl_session";

/// Raw `?league=&format=&refresh=` parameters.
///
/// Everything stays textual so bad values can be answered with usage help
/// rather than a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct StandingsQuery {
    pub league: Option<String>,
    pub format: Option<String>,
    pub refresh: Option<String>,
}

impl StandingsQuery {
    /// League parameter, with a blank value treated as absent.
    pub fn league(&self) -> Option<&str> {
        self.league.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_param(self.format.as_deref())
    }

    pub fn refresh(&self) -> bool {
        self.refresh.as_deref().is_some_and(is_truthy)
    }
}

/// `1`, `true`, `yes` and `on`, case-insensitive.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Session named by the `fpl_session` cookie, if the client sent one.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| SessionId::new(value))
}
