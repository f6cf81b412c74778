//! HTTP client for the FPL API.
//!
//! Every request defeats intermediary caches: a monotonically increasing
//! `_` query parameter is appended and no-cache headers are sent. Calls are
//! never retried here; the caller owns the failure policy.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use chrono::Utc;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::Settings,
    error::FplError,
    fpl::types::{Bootstrap, EntryDetail, LeagueStandings},
    EntryId, LeagueId, Result,
};


/// Base path for the public FPL API.
pub const FPL_BASE_URL: &str = "https://fantasy.premierleague.com/api";

/// Query parameter carrying the cache-busting value.
pub const CACHE_BUST_PARAM: &str = "_";

static LAST_CACHE_BUST: AtomicU64 = AtomicU64::new(0);

/// Next cache-busting value: current epoch millis, bumped so it never repeats.
pub fn next_cache_bust() -> u64 {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let previous = LAST_CACHE_BUST
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

pub(crate) enum Endpoint {
    Bootstrap,
    LeagueStandings(LeagueId, u32),
    Entry(EntryId),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Bootstrap => write!(f, "/bootstrap-static/"),
            Endpoint::LeagueStandings(league_id, page) => write!(
                f,
                "/leagues-classic/{}/standings/?page_standings={}",
                league_id, page
            ),
            Endpoint::Entry(entry_id) => write!(f, "/entry/{}/", entry_id),
        }
    }
}

/// Headers sent on every request
pub fn no_cache_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    h.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    h
}

#[derive(Debug, Clone)]
pub struct FplClient {
    http: Client,
    base_url: String,
}

impl FplClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(no_cache_headers())
            .build()
            .map_err(FplError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.base_url.clone(),
            settings.timeout(),
            &settings.user_agent,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Fails with `Transport` on network errors and timeouts, with
    /// `UpstreamStatus` on anything other than 200, and with `Aggregation`
    /// when a 200 body is not JSON.
    pub async fn fetch(&self, url: &str) -> Result<Value> {
        let cache_bust = next_cache_bust().to_string();
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .query(&[(CACHE_BUST_PARAM, cache_bust.as_str())])
            .send()
            .await
            .map_err(FplError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FplError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(FplError::Transport)?;
        serde_json::from_str(&body)
            .map_err(|err| FplError::aggregation(format!("response from {url} is not JSON: {err}")))
    }

    async fn fetch_as<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let value = self.fetch(&url).await?;
        serde_json::from_value(value).map_err(|err| {
            FplError::aggregation(format!("unexpected response shape from {url}: {err}"))
        })
    }

    /// Gameweek list (endpoint A)
    pub async fn bootstrap(&self) -> Result<Bootstrap> {
        self.fetch_as(Endpoint::Bootstrap).await
    }

    /// One page of a classic league's members (endpoint B); pages start at 1
    pub async fn league_standings(&self, league_id: LeagueId, page: u32) -> Result<LeagueStandings> {
        self.fetch_as(Endpoint::LeagueStandings(league_id, page)).await
    }

    /// Entry summary (endpoint C)
    pub async fn entry(&self, entry_id: EntryId) -> Result<EntryDetail> {
        self.fetch_as(Endpoint::Entry(entry_id)).await
    }
}
