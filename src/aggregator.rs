//! Assembly of league snapshots from the FPL API.
//!
//! A snapshot is built from three kinds of calls: the gameweek list, the
//! league's member pages, and one entry detail call per member. Fresh
//! snapshots are written through to the store; when a refresh fails, the
//! last stored snapshot (of any age) is served with a stale notice instead.

use std::{collections::HashSet, sync::Arc, time::Duration};

use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    error::FplError,
    fpl::{
        compute::{rank_entries, select_current_gameweek},
        types::RosterMember,
        FplClient,
    },
    storage::{LeagueSnapshot, SnapshotStore, StandingEntry},
    LeagueId, Result,
};

#[cfg(test)]
mod tests;

/// Tuning knobs for [`Aggregator`].
#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    /// How long a stored snapshot is served without contacting upstream.
    pub ttl: Duration,
    /// Maximum number of entry detail calls in flight at once.
    pub detail_concurrency: usize,
    /// Upper bound on league member pages fetched per assembly.
    pub max_roster_pages: u32,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for AggregatorOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            ttl: settings.cache_ttl(),
            detail_concurrency: settings.detail_concurrency,
            max_roster_pages: settings.max_roster_pages,
        }
    }
}

pub struct Aggregator {
    client: FplClient,
    store: Arc<dyn SnapshotStore>,
    options: AggregatorOptions,
}

impl Aggregator {
    pub fn new(client: FplClient, store: Arc<dyn SnapshotStore>, options: AggregatorOptions) -> Self {
        Self {
            client,
            store,
            options,
        }
    }

    pub fn from_settings(settings: &Settings, store: Arc<dyn SnapshotStore>) -> Result<Self> {
        Ok(Self::new(
            FplClient::from_settings(settings)?,
            store,
            AggregatorOptions::from(settings),
        ))
    }

    /// Produce the snapshot for `league_id`.
    ///
    /// Without `force_refresh`, a stored snapshot younger than the TTL is
    /// returned as-is. Otherwise upstream is queried; on an upstream failure
    /// the previous snapshot is returned with `stale_notice` set, or the
    /// error propagates if nothing was ever stored.
    pub async fn assemble(&self, league_id: LeagueId, force_refresh: bool) -> Result<LeagueSnapshot> {
        if !force_refresh && self.store.is_fresh(league_id, self.options.ttl) {
            if let Some(snapshot) = self.store.read(league_id) {
                debug!(%league_id, "Serving cached snapshot");
                return Ok(snapshot);
            }
        }

        match self.fetch_snapshot(league_id).await {
            Ok(mut snapshot) => {
                snapshot.cached_at = Some(Utc::now());
                if let Err(err) = self.store.write(league_id, &snapshot) {
                    warn!(%league_id, error = %err, "Failed to cache snapshot");
                }
                info!(
                    %league_id,
                    gameweek = %snapshot.current_gameweek,
                    entries = snapshot.entries.len(),
                    "Assembled fresh snapshot"
                );
                Ok(snapshot)
            }
            Err(err) if err.is_upstream() => match self.store.read(league_id) {
                Some(previous) => {
                    warn!(%league_id, error = %err, "Refresh failed, serving stale snapshot");
                    let notice = stale_notice(&err, &previous);
                    Ok(previous.into_stale(notice))
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    async fn fetch_snapshot(&self, league_id: LeagueId) -> Result<LeagueSnapshot> {
        let bootstrap = self.client.bootstrap().await?;
        let current_gameweek = select_current_gameweek(&bootstrap.events);

        let (league_name, roster) = self.fetch_roster(league_id).await?;
        let entries = rank_entries(self.fetch_entries(roster).await?);

        Ok(LeagueSnapshot {
            league_id,
            league_name,
            current_gameweek,
            entries,
            generated_at: Utc::now(),
            cached_at: None,
            stale_notice: None,
        })
    }

    /// League name plus every member across all standings pages, in page order.
    async fn fetch_roster(&self, league_id: LeagueId) -> Result<(String, Vec<RosterMember>)> {
        let mut league_name = String::new();
        let mut roster = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1;

        loop {
            let response = self.client.league_standings(league_id, page).await?;
            if page == 1 {
                league_name = response.league.name;
            }

            let standings = response.standings.ok_or_else(|| {
                FplError::aggregation(format!("league {league_id} response has no standings"))
            })?;
            let results = standings.results.ok_or_else(|| {
                FplError::aggregation(format!("league {league_id} standings have no results"))
            })?;

            // Members can shift between pages while a gameweek is live
            roster.extend(results.into_iter().filter(|m| seen.insert(m.entry)));

            if !standings.has_next {
                break;
            }
            if page >= self.options.max_roster_pages {
                warn!(%league_id, pages = page, "Stopped paging league standings at the configured limit");
                break;
            }
            page += 1;
        }

        if roster.is_empty() {
            return Err(FplError::aggregation(format!(
                "league {league_id} has no entries"
            )));
        }

        debug!(%league_id, members = roster.len(), pages = page, "Fetched league roster");
        Ok((league_name, roster))
    }

    /// Detail call per member; output order matches `roster` regardless of concurrency.
    async fn fetch_entries(&self, roster: Vec<RosterMember>) -> Result<Vec<StandingEntry>> {
        let client = &self.client;

        stream::iter(roster)
            .map(|member| async move {
                let detail = client.entry(member.entry).await?;
                Ok::<_, FplError>(StandingEntry {
                    rank: 0,
                    entry_id: member.entry,
                    entry_name: member.entry_name,
                    owner_name: member.player_name,
                    total_points: detail.summary_overall_points.unwrap_or(0),
                    period_points: detail.summary_event_points.unwrap_or(0),
                    global_rank: detail.summary_overall_rank.unwrap_or(0),
                })
            })
            .buffered(self.options.detail_concurrency.max(1))
            .try_collect()
            .await
    }
}

fn stale_notice(err: &FplError, previous: &LeagueSnapshot) -> String {
    format!(
        "Could not refresh standings ({err}). Showing data from {}.",
        previous.last_updated().format(crate::render::TIMESTAMP_FORMAT)
    )
}
