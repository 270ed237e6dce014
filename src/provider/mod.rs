//! The music provider's Web API.

mod client;
mod retry;

pub use client::ProviderClient;
pub use retry::call_with_refresh;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::RelayError;
use crate::playback::PlayCommand;

/// Status and raw body of a provider call. Interpreting the status is left
/// to the caller so that 401 and 204 can drive the relay's flow.
#[derive(Clone, Debug)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RelayError> {
        serde_json::from_str(&self.body).map_err(|e| RelayError::Upstream {
            status: Some(self.status.as_u16()),
            message: format!("unreadable provider response: {}", e),
        })
    }

    pub fn into_error(self) -> RelayError {
        RelayError::upstream_status(self.status.as_u16(), &self.body)
    }
}

#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// `GET /v1/me`
    async fn current_user(&self, access_token: &str) -> Result<ProviderResponse>;

    /// `GET /v1/me/player/currently-playing`, including podcast episodes.
    async fn currently_playing(&self, access_token: &str) -> Result<ProviderResponse>;

    /// `GET /v1/me/player/recently-played`
    async fn recently_played(&self, access_token: &str, limit: u32) -> Result<ProviderResponse>;

    /// `PUT /v1/me/player/play`
    async fn play(&self, access_token: &str, command: &PlayCommand) -> Result<ProviderResponse>;
}
