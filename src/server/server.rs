use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::info;

use super::playback_routes::make_playback_routes;
use super::{log_requests, state::*, ServerConfig};
use crate::auth::HttpAuthClient;
use crate::config::AppConfig;
use crate::profile::HttpProfileService;
use crate::provider::ProviderClient;
use crate::relay::PlaybackRelay;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, relay: GuardedRelay) -> Router {
    let state = ServerState::new(config.clone(), relay);

    let playback_routes = make_playback_routes(state.clone());

    let app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest(&config.routes_prefix, playback_routes);

    app.layer(middleware::from_fn_with_state(config, log_requests))
}

/// Wires the HTTP clients for the provider, the user-profile service and the
/// auth service into a relay.
pub fn build_relay(config: &AppConfig) -> Result<PlaybackRelay> {
    let timeout = config.request_timeout_sec;
    let profile = HttpProfileService::new(config.relay.clone(), timeout)?;
    let refresher = HttpAuthClient::new(&config.relay, timeout)?;
    let provider = ProviderClient::new(&config.provider_url, timeout)?;

    Ok(PlaybackRelay::new(
        Arc::new(profile),
        Arc::new(refresher),
        Arc::new(provider),
        config.persist_playback,
    ))
}

pub async fn run_server(config: AppConfig) -> Result<()> {
    let relay = Arc::new(build_relay(&config)?);
    let server_config = ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
        routes_prefix: config.relay.routes_prefix(),
    };
    info!(
        "Playback routes mounted at {}, user-profile service at {}{}",
        server_config.routes_prefix, config.relay.base_url, config.relay.api_prefix
    );

    let app = make_app(server_config, relay);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Ready to serve at {}!", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down");
}
