//! HTTP front end.
//!
//! `GET /?league=<id>&format=<html|json|csv>&refresh=1` serves the same view
//! as `fpl-standings get`; `GET /health` reports liveness.

pub mod error;
pub mod handlers;
pub mod query;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, Level};

use crate::{storage::open_store, Aggregator, RateLimiter, Result, Settings};

pub use error::ServerError;
pub use query::{StandingsQuery, SESSION_COOKIE};

/// Shared state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(aggregator: Aggregator, limiter: RateLimiter) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            limiter: Arc::new(limiter),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store = open_store(settings)?;
        Ok(Self::new(
            Aggregator::from_settings(settings, store)?,
            RateLimiter::from_settings(settings),
        ))
    }
}

/// Build the application router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::standings))
        .route("/health", get(handlers::health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Bind `host:port` from settings and serve until Ctrl-C or SIGTERM.
pub async fn run(settings: Settings) -> Result<()> {
    let state = AppState::from_settings(&settings)?;
    let addr = format!("{}:{}", settings.host, settings.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        backend = ?settings.cache_backend,
        cache_dir = %settings.resolved_cache_dir().display(),
        "Serving league standings"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
