//! Cooldown guard for forced refreshes.
//!
//! Each (session, league) pair may force a refresh once per cooldown window.
//! Ordinary reads never consult the limiter.

use std::{
    fmt,
    num::NonZeroUsize,
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::{DateTime, Utc};
use lru::LruCache;

use crate::{config::Settings, error::FplError, LeagueId, Result};

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(by) = chrono::Duration::from_std(by) {
            let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Opaque identifier of a user session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random session id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Denied { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }

    /// `Ok(())` when allowed, `RateLimited` otherwise.
    pub fn into_result(self) -> Result<()> {
        match self {
            RateDecision::Allowed => Ok(()),
            RateDecision::Denied { retry_after_secs } => {
                Err(FplError::RateLimited { retry_after_secs })
            }
        }
    }
}

type CooldownKey = (SessionId, LeagueId);

pub struct RateLimiter {
    cooldown: Duration,
    clock: Arc<dyn Clock>,
    // Bounded so abandoned sessions don't accumulate forever
    starts: Mutex<LruCache<CooldownKey, DateTime<Utc>>>,
}

impl RateLimiter {
    pub fn new(cooldown: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cooldown,
            clock,
            starts: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.refresh_cooldown(),
            settings.rate_limit_capacity,
            Arc::new(SystemClock),
        )
    }

    /// Allow the refresh and start a new cooldown, or report the time left.
    ///
    /// Check and record happen under one lock, so two concurrent refreshes
    /// for the same key can't both be allowed.
    pub fn check_and_consume(&self, session: &SessionId, league_id: LeagueId) -> RateDecision {
        let now = self.clock.now();
        let key = (session.clone(), league_id);
        let mut starts = self.starts.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(started) = starts.get(&key) {
            let elapsed = (now - *started).to_std().unwrap_or(Duration::ZERO);
            if elapsed < self.cooldown {
                return RateDecision::Denied {
                    retry_after_secs: ceil_secs(self.cooldown - elapsed),
                };
            }
        }

        starts.put(key, now);
        RateDecision::Allowed
    }
}

/// Whole seconds, rounded up, never below one.
fn ceil_secs(d: Duration) -> u64 {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    secs.max(1)
}
