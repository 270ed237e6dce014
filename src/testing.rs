//! In-memory stand-ins for the upstream services, shared by unit tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::auth::{TokenPair, TokenRefresher};
use crate::playback::{PlayCommand, PlaybackRecord};
use crate::profile::{ProfileService, TokenUpdate, UserRecord};
use crate::provider::{ProviderApi, ProviderResponse};

#[derive(Default)]
pub struct StubProfileService {
    users: HashMap<String, UserRecord>,
    fail_updates: bool,
    lookups: Mutex<usize>,
    token_updates: Mutex<Vec<(String, TokenUpdate)>>,
    playback_updates: Mutex<Vec<(String, Option<PlaybackRecord>)>>,
}

impl StubProfileService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(
        mut self,
        user_id: &str,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Self {
        self.users.insert(
            user_id.to_string(),
            UserRecord {
                spotify_access_token: access_token.map(String::from),
                spotify_refresh_token: refresh_token.map(String::from),
            },
        );
        self
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }

    pub fn token_updates(&self) -> Vec<(String, TokenUpdate)> {
        self.token_updates.lock().unwrap().clone()
    }

    pub fn playback_updates(&self) -> Vec<(String, Option<PlaybackRecord>)> {
        self.playback_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileService for StubProfileService {
    async fn get_user(&self, user_id: &str) -> Result<UserRecord> {
        *self.lookups.lock().unwrap() += 1;
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| anyhow!("User not found: {}", user_id))
    }

    async fn update_tokens(&self, user_id: &str, update: &TokenUpdate) -> Result<()> {
        self.token_updates
            .lock()
            .unwrap()
            .push((user_id.to_string(), update.clone()));
        if self.fail_updates {
            return Err(anyhow!("profile service unavailable"));
        }
        Ok(())
    }

    async fn update_playback(
        &self,
        user_id: &str,
        playback: Option<&PlaybackRecord>,
    ) -> Result<()> {
        self.playback_updates
            .lock()
            .unwrap()
            .push((user_id.to_string(), playback.cloned()));
        if self.fail_updates {
            return Err(anyhow!("profile service unavailable"));
        }
        Ok(())
    }
}

pub struct StubRefresher {
    issued: Option<TokenPair>,
    calls: Mutex<Vec<String>>,
}

impl StubRefresher {
    pub fn issuing(access_token: &str, refresh_token: Option<&str>) -> Self {
        Self {
            issued: Some(TokenPair {
                access_token: access_token.to_string(),
                refresh_token: refresh_token.map(String::from),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            issued: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Refresh tokens received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenRefresher for StubRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        self.calls.lock().unwrap().push(refresh_token.to_string());
        self.issued
            .clone()
            .ok_or_else(|| anyhow!("refresh token revoked"))
    }
}

/// Scripted provider: each endpoint replays its queued responses in order and
/// records the access token of every call.
#[derive(Default)]
pub struct StubProvider {
    responses: Mutex<HashMap<&'static str, VecDeque<ProviderResponse>>>,
    calls: Mutex<Vec<(&'static str, String)>>,
    play_commands: Mutex<Vec<PlayCommand>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: &'static str, status: StatusCode, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(ProviderResponse::new(status, body));
        self
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .count()
    }

    pub fn play_commands(&self) -> Vec<PlayCommand> {
        self.play_commands.lock().unwrap().clone()
    }

    fn next(&self, endpoint: &'static str, access_token: &str) -> Result<ProviderResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint, access_token.to_string()));
        self.responses
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(|queue| queue.pop_front())
            .ok_or_else(|| anyhow!("no scripted response for {}", endpoint))
    }
}

#[async_trait]
impl ProviderApi for StubProvider {
    async fn current_user(&self, access_token: &str) -> Result<ProviderResponse> {
        self.next("me", access_token)
    }

    async fn currently_playing(&self, access_token: &str) -> Result<ProviderResponse> {
        self.next("currently_playing", access_token)
    }

    async fn recently_played(&self, access_token: &str, _limit: u32) -> Result<ProviderResponse> {
        self.next("recently_played", access_token)
    }

    async fn play(&self, access_token: &str, command: &PlayCommand) -> Result<ProviderResponse> {
        self.play_commands.lock().unwrap().push(command.clone());
        self.next("play", access_token)
    }
}
