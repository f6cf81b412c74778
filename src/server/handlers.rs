use axum::{
    extract::{Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use super::{
    error::{instructions_page, ServerError},
    query::{session_from_headers, StandingsQuery, SESSION_COOKIE},
    AppState,
};
use crate::{
    commands::standings::load_standings,
    render::{csv::csv_filename, render},
    LeagueId, LeagueSnapshot, OutputFormat, SessionId,
};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /`: standings for `?league=`, or the instructions page.
pub async fn standings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StandingsQuery>,
) -> Response {
    let (session, issued) = match session_from_headers(&headers) {
        Some(session) => (session, false),
        None => (SessionId::generate(), true),
    };

    let mut response = match respond(&state, &session, &query).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };

    if issued {
        let cookie = format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    response
}

async fn respond(
    state: &AppState,
    session: &SessionId,
    query: &StandingsQuery,
) -> Result<Response, ServerError> {
    let format = query.format();

    let Some(raw) = query.league() else {
        return Ok(instructions_page(StatusCode::OK, None));
    };

    // Validated before any upstream call
    let league_id: LeagueId = raw.parse().map_err(|err| ServerError::new(err, format))?;
    debug!(league_id = %league_id, format = %format, refresh = query.refresh(), "Standings request");

    let snapshot = load_standings(
        &state.aggregator,
        &state.limiter,
        session,
        league_id,
        query.refresh(),
    )
    .await
    .map_err(|err| ServerError::new(err, format))?;

    standings_response(&snapshot, format).map_err(|err| ServerError::new(err, format))
}

fn standings_response(snapshot: &LeagueSnapshot, format: OutputFormat) -> crate::Result<Response> {
    let body = render(snapshot, format)?;
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
    if format == OutputFormat::Csv {
        let disposition = format!("attachment; filename=\"{}\"", csv_filename(snapshot));
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(CONTENT_DISPOSITION, value);
        }
    }
    Ok(response)
}
