//! Integration tests for command helpers

use fpl_standings::{commands::resolve_league_id, FplError, LEAGUE_ID_ENV_VAR};

// Environment variables are process-wide, so every case runs in one test.
#[test]
fn test_resolve_league_id_sources() {
    // Explicit value wins over the environment
    std::env::set_var(LEAGUE_ID_ENV_VAR, "54321");
    assert_eq!(resolve_league_id(Some("12345")).unwrap().as_u32(), 12345);

    // Falls back to the environment
    assert_eq!(resolve_league_id(None).unwrap().as_u32(), 54321);

    // A bad environment value is reported, not ignored
    std::env::set_var(LEAGUE_ID_ENV_VAR, "not-a-number");
    assert!(matches!(
        resolve_league_id(None),
        Err(FplError::InvalidInput { .. })
    ));

    std::env::remove_var(LEAGUE_ID_ENV_VAR);
    match resolve_league_id(None).unwrap_err() {
        FplError::MissingLeagueId { env_var } => assert_eq!(env_var, LEAGUE_ID_ENV_VAR),
        other => panic!("Expected MissingLeagueId error, got {other:?}"),
    }
}
