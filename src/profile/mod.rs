//! Access to the internal user-profile service, the system of record for
//! users' provider tokens.

mod client;

pub use client::HttpProfileService;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackRecord;

/// The subset of a stored user record the relay reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub spotify_access_token: Option<String>,
    #[serde(default)]
    pub spotify_refresh_token: Option<String>,
}

/// Token fields written back after a refresh. The refresh token is only sent
/// when the auth service issued a new one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenUpdate {
    pub spotify_access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_refresh_token: Option<String>,
}

#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<UserRecord>;

    async fn update_tokens(&self, user_id: &str, update: &TokenUpdate) -> Result<()>;

    async fn update_playback(&self, user_id: &str, playback: Option<&PlaybackRecord>)
        -> Result<()>;
}
