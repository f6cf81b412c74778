//! Self-contained HTML pages.
//!
//! Templates are compiled into the binary. Refreshing is a plain link back to
//! the same page with `refresh=1`; the page itself never calls an API.

use minijinja::{context, Environment};

use super::{last_updated, rows};
use crate::{storage::LeagueSnapshot, Result};

const STANDINGS_TEMPLATE: &str = "standings.html";
const INSTRUCTIONS_TEMPLATE: &str = "instructions.html";

const STYLE: &str = r#"
    body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem auto; max-width: 960px; color: #1d1d1f; padding: 0 1rem; }
    h1 { color: #37003c; margin-bottom: 0.25rem; }
    .meta { color: #555; margin-bottom: 1rem; }
    .stale { background: #fff4e5; border: 1px solid #f0a030; padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
    .error { background: #fdecea; border: 1px solid #e53935; padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
    table { border-collapse: collapse; width: 100%; }
    th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e5e5; text-align: left; }
    th { background: #37003c; color: #fff; }
    td.num, th.num { text-align: right; }
    tr:nth-child(even) td { background: #f7f7f9; }
    .actions a { margin-right: 1rem; }
    code { background: #f2f2f2; padding: 0.1rem 0.3rem; border-radius: 3px; }
"#;

const STANDINGS_SOURCE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ league.name }} - Gameweek {{ league.current_gameweek }}</title>
<style>{{ style|safe }}</style>
</head>
<body>
<h1>{{ league.name }}</h1>
<div class="meta">Gameweek {{ league.current_gameweek }} &middot; Last updated {{ last_updated }}</div>
{% if stale_notice %}<div class="stale">{{ stale_notice }}</div>
{% endif %}<div class="actions">
<a href="?league={{ league.id }}&amp;refresh=1">Refresh</a>
<a href="?league={{ league.id }}&amp;format=json">JSON</a>
<a href="?league={{ league.id }}&amp;format=csv">CSV</a>
</div>
<table>
<thead>
<tr><th class="num">Rank</th><th>Team Name</th><th>Manager Name</th><th class="num">Total Points</th><th class="num">Gameweek Points</th><th class="num">Overall Rank</th></tr>
</thead>
<tbody>
{% for row in standings %}<tr><td class="num">{{ row.rank }}</td><td>{{ row.entry_name }}</td><td>{{ row.player_name }}</td><td class="num">{{ row.total_points }}</td><td class="num">{{ row.event_points }}</td><td class="num">{{ row.overall_rank }}</td></tr>
{% endfor %}</tbody>
</table>
</body>
</html>
"#;

const INSTRUCTIONS_SOURCE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>FPL League Standings</title>
<style>{{ style|safe }}</style>
</head>
<body>
<h1>FPL League Standings</h1>
{% if message %}<div class="error">{{ message }}</div>
{% endif %}<p>Show the live table of any Fantasy Premier League classic league.</p>
<form method="get" action="">
<label for="league">League ID</label>
<input id="league" name="league" inputmode="numeric" pattern="[0-9]+" required>
<select name="format">
<option value="html">HTML</option>
<option value="json">JSON</option>
<option value="csv">CSV</option>
</select>
<button type="submit">Show standings</button>
</form>
<p>The league ID is the number in the league's URL on the FPL site, e.g.
<code>https://fantasy.premierleague.com/leagues/<strong>314</strong>/standings/c</code>.</p>
<p>Query parameters: <code>league</code> (required, numeric), <code>format</code>
(<code>html</code>, <code>json</code> or <code>csv</code>), <code>refresh=1</code> to bypass the cache.</p>
</body>
</html>
"#;

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(STANDINGS_TEMPLATE, STANDINGS_SOURCE)?;
    env.add_template(INSTRUCTIONS_TEMPLATE, INSTRUCTIONS_SOURCE)?;
    Ok(env)
}

pub fn render_html(snapshot: &LeagueSnapshot) -> Result<Vec<u8>> {
    let env = environment()?;
    let page = env.get_template(STANDINGS_TEMPLATE)?.render(context! {
        style => STYLE,
        league => context! {
            id => snapshot.league_id.as_u32(),
            name => &snapshot.league_name,
            current_gameweek => snapshot.current_gameweek.as_u16(),
        },
        standings => rows(snapshot),
        last_updated => last_updated(snapshot),
        stale_notice => &snapshot.stale_notice,
    })?;
    Ok(page.into_bytes())
}

/// Instructions page, optionally with an error banner.
pub fn render_instructions(message: Option<&str>) -> Result<Vec<u8>> {
    let env = environment()?;
    let page = env
        .get_template(INSTRUCTIONS_TEMPLATE)?
        .render(context! { style => STYLE, message => message })?;
    Ok(page.into_bytes())
}
