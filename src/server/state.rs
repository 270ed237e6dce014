use axum::extract::FromRef;

use crate::relay::PlaybackRelay;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedRelay = Arc<PlaybackRelay>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub relay: GuardedRelay,
}

impl ServerState {
    pub fn new(config: ServerConfig, relay: GuardedRelay) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            relay,
        }
    }
}

impl FromRef<ServerState> for GuardedRelay {
    fn from_ref(input: &ServerState) -> Self {
        input.relay.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
