//! Unit tests for snapshot assembly against a mocked FPL API

use super::*;
use crate::{storage::SqliteSnapshotStore, EntryId, Gameweek};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const LEAGUE: LeagueId = LeagueId(314);

fn bootstrap_body() -> Value {
    json!({
        "events": [
            {"id": 1, "is_current": false, "finished": true},
            {"id": 2, "is_current": true, "finished": false},
            {"id": 3, "is_current": false, "finished": false}
        ]
    })
}

fn league_body(members: &[(u64, &str, &str)], has_next: bool) -> Value {
    let results: Vec<Value> = members
        .iter()
        .map(|(id, team, owner)| {
            // `total` lags the entry endpoint and must be ignored
            json!({"entry": id, "entry_name": team, "player_name": owner, "total": 1})
        })
        .collect();
    json!({
        "league": {"id": LEAGUE.as_u32(), "name": "Test League"},
        "standings": {"has_next": has_next, "results": results}
    })
}

fn entry_body(total: i64, event: i64, overall_rank: u64) -> Value {
    json!({
        "summary_overall_points": total,
        "summary_event_points": event,
        "summary_overall_rank": overall_rank
    })
}

async fn mount_bootstrap(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/bootstrap-static/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bootstrap_body()))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_league_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/leagues-classic/{}/standings/", LEAGUE)))
        .and(query_param("page_standings", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_entry(server: &MockServer, id: u64, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/entry/{id}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Two-member league: A scores 50, B scores 80.
async fn mount_two_member_league(server: &MockServer, bootstrap_calls: u64) {
    mount_bootstrap(server, bootstrap_calls).await;
    mount_league_page(server, 1, league_body(&[(1, "A", "Alice"), (2, "B", "Bob")], false)).await;
    mount_entry(server, 1, entry_body(50, 5, 2000)).await;
    mount_entry(server, 2, entry_body(80, 8, 1000)).await;
}

fn aggregator_with(server: &MockServer, store: Arc<dyn SnapshotStore>, options: AggregatorOptions) -> Aggregator {
    let client = FplClient::new(server.uri(), Duration::from_secs(5), "test").unwrap();
    Aggregator::new(client, store, options)
}

fn memory_store() -> Arc<dyn SnapshotStore> {
    Arc::new(SqliteSnapshotStore::new_in_memory().unwrap())
}

#[tokio::test]
async fn test_assemble_ranks_by_entry_totals() {
    let server = MockServer::start().await;
    mount_two_member_league(&server, 1).await;

    let store = memory_store();
    let aggregator = aggregator_with(&server, store.clone(), AggregatorOptions::default());
    let snapshot = aggregator.assemble(LEAGUE, false).await.unwrap();

    assert_eq!(snapshot.league_id, LEAGUE);
    assert_eq!(snapshot.league_name, "Test League");
    assert_eq!(snapshot.current_gameweek, Gameweek::new(2));
    assert!(snapshot.cached_at.is_some());
    assert!(snapshot.stale_notice.is_none());

    let b = &snapshot.entries[0];
    assert_eq!((b.entry_name.as_str(), b.rank, b.total_points), ("B", 1, 80));
    assert_eq!(b.owner_name, "Bob");
    assert_eq!(b.period_points, 8);
    assert_eq!(b.global_rank, 1000);

    let a = &snapshot.entries[1];
    assert_eq!((a.entry_name.as_str(), a.rank, a.total_points), ("A", 2, 50));

    // Written through to the store
    assert_eq!(store.read(LEAGUE), Some(snapshot));
}

#[tokio::test]
async fn test_cache_hit_makes_no_remote_calls() {
    let server = MockServer::start().await;
    // Only the first assembly may reach upstream
    mount_two_member_league(&server, 1).await;

    let aggregator = aggregator_with(&server, memory_store(), AggregatorOptions::default());
    let first = aggregator.assemble(LEAGUE, false).await.unwrap();
    let second = aggregator.assemble(LEAGUE, false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_force_refresh_bypasses_fresh_cache() {
    let server = MockServer::start().await;
    mount_two_member_league(&server, 2).await;

    let aggregator = aggregator_with(&server, memory_store(), AggregatorOptions::default());
    aggregator.assemble(LEAGUE, false).await.unwrap();
    aggregator.assemble(LEAGUE, true).await.unwrap();
}

#[tokio::test]
async fn test_expired_snapshot_is_refetched() {
    let server = MockServer::start().await;
    mount_two_member_league(&server, 2).await;

    let options = AggregatorOptions {
        ttl: Duration::ZERO,
        ..AggregatorOptions::default()
    };
    let aggregator = aggregator_with(&server, memory_store(), options);
    aggregator.assemble(LEAGUE, false).await.unwrap();
    aggregator.assemble(LEAGUE, false).await.unwrap();
}

#[tokio::test]
async fn test_failed_refresh_serves_stale_snapshot() {
    let store = memory_store();

    let healthy = MockServer::start().await;
    mount_two_member_league(&healthy, 1).await;
    let original = aggregator_with(&healthy, store.clone(), AggregatorOptions::default())
        .assemble(LEAGUE, false)
        .await
        .unwrap();

    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    let stale = aggregator_with(&broken, store.clone(), AggregatorOptions::default())
        .assemble(LEAGUE, true)
        .await
        .unwrap();

    assert_eq!(stale.entries, original.entries);
    assert_eq!(stale.cached_at, original.cached_at);
    let notice = stale.stale_notice.expect("stale notice set");
    assert!(notice.contains("503"), "notice was {notice:?}");

    // The stored record is untouched by the failed refresh
    assert_eq!(store.read(LEAGUE), Some(original));
}

#[tokio::test]
async fn test_failed_refresh_without_cache_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = aggregator_with(&server, memory_store(), AggregatorOptions::default())
        .assemble(LEAGUE, true)
        .await
        .unwrap_err();

    assert!(matches!(err, FplError::UpstreamStatus { status: 500, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_failed_entry_call_aborts_assembly() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(&server, 1, league_body(&[(1, "A", "Alice"), (2, "B", "Bob")], false)).await;
    mount_entry(&server, 1, entry_body(50, 5, 2000)).await;
    Mock::given(method("GET"))
        .and(path("/entry/2/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = memory_store();
    let err = aggregator_with(&server, store.clone(), AggregatorOptions::default())
        .assemble(LEAGUE, false)
        .await
        .unwrap_err();

    assert!(matches!(err, FplError::UpstreamStatus { status: 404, .. }));
    assert!(store.read(LEAGUE).is_none());
}

#[tokio::test]
async fn test_missing_results_is_aggregation_error() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(
        &server,
        1,
        json!({"league": {"name": "H2H"}, "standings": {"has_next": false}}),
    )
    .await;

    let err = aggregator_with(&server, memory_store(), AggregatorOptions::default())
        .assemble(LEAGUE, false)
        .await
        .unwrap_err();

    assert!(matches!(err, FplError::Aggregation { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_empty_league_is_aggregation_error() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(&server, 1, league_body(&[], false)).await;

    let err = aggregator_with(&server, memory_store(), AggregatorOptions::default())
        .assemble(LEAGUE, false)
        .await
        .unwrap_err();

    match err {
        FplError::Aggregation { message } => assert!(message.contains("no entries")),
        other => panic!("Expected Aggregation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_roster_pages_are_followed_and_deduplicated() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(&server, 1, league_body(&[(1, "A", "a"), (2, "B", "b")], true)).await;
    // Entry 2 slid onto page 2 between requests
    mount_league_page(&server, 2, league_body(&[(2, "B", "b"), (3, "C", "c")], false)).await;
    mount_entry(&server, 1, entry_body(10, 1, 3)).await;
    mount_entry(&server, 2, entry_body(30, 3, 1)).await;
    mount_entry(&server, 3, entry_body(20, 2, 2)).await;

    let snapshot = aggregator_with(&server, memory_store(), AggregatorOptions::default())
        .assemble(LEAGUE, false)
        .await
        .unwrap();

    let ids: Vec<u64> = snapshot.entries.iter().map(|e| e.entry_id.as_u64()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_roster_paging_stops_at_limit() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(&server, 1, league_body(&[(1, "A", "a")], true)).await;
    mount_league_page(&server, 2, league_body(&[(2, "B", "b")], true)).await;
    mount_entry(&server, 1, entry_body(10, 1, 3)).await;
    mount_entry(&server, 2, entry_body(30, 3, 1)).await;

    let options = AggregatorOptions {
        max_roster_pages: 2,
        ..AggregatorOptions::default()
    };
    let snapshot = aggregator_with(&server, memory_store(), options)
        .assemble(LEAGUE, false)
        .await
        .unwrap();

    assert_eq!(snapshot.entries.len(), 2);
}

#[tokio::test]
async fn test_concurrent_detail_calls_keep_tie_order() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(
        &server,
        1,
        league_body(&[(1, "first", "a"), (2, "second", "b"), (3, "third", "c")], false),
    )
    .await;

    // Earlier roster members answer slower, so completion order is reversed
    for (id, delay_ms) in [(1u64, 150u64), (2, 75), (3, 0)] {
        Mock::given(method("GET"))
            .and(path(format!("/entry/{id}/")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(entry_body(42, 1, id))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let options = AggregatorOptions {
        detail_concurrency: 3,
        ..AggregatorOptions::default()
    };
    let snapshot = aggregator_with(&server, memory_store(), options)
        .assemble(LEAGUE, false)
        .await
        .unwrap();

    let names: Vec<&str> = snapshot.entries.iter().map(|e| e.entry_name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    let ranks: Vec<u32> = snapshot.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_null_entry_summary_defaults_to_zero() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, 1).await;
    mount_league_page(&server, 1, league_body(&[(7, "New", "Newbie")], false)).await;
    mount_entry(
        &server,
        7,
        json!({"summary_overall_points": null, "summary_event_points": null, "summary_overall_rank": null}),
    )
    .await;

    let snapshot = aggregator_with(&server, memory_store(), AggregatorOptions::default())
        .assemble(LEAGUE, false)
        .await
        .unwrap();

    let entry = &snapshot.entries[0];
    assert_eq!(entry.entry_id, EntryId::new(7));
    assert_eq!((entry.total_points, entry.period_points, entry.global_rank), (0, 0, 0));
}
