//! Bearer-authenticated HTTP client for the provider's Web API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

use super::{ProviderApi, ProviderResponse};
use crate::playback::PlayCommand;

pub struct ProviderClient {
    client: Client,
    base_url: String,
}

impl ProviderClient {
    /// # Arguments
    /// * `base_url` - Root of the provider API (e.g., "https://api.spotify.com")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, access_token: &str) -> Result<ProviderResponse> {
        let response = request
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach provider")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read provider response")?;
        debug!("Provider responded with {} ({} bytes)", status, body.len());

        Ok(ProviderResponse { status, body })
    }
}

#[async_trait]
impl ProviderApi for ProviderClient {
    async fn current_user(&self, access_token: &str) -> Result<ProviderResponse> {
        let request = self.client.get(self.url("/v1/me"));
        self.send(request, access_token).await
    }

    async fn currently_playing(&self, access_token: &str) -> Result<ProviderResponse> {
        let request = self
            .client
            .get(self.url("/v1/me/player/currently-playing"))
            .query(&[("additional_types", "episode")]);
        self.send(request, access_token).await
    }

    async fn recently_played(&self, access_token: &str, limit: u32) -> Result<ProviderResponse> {
        let request = self
            .client
            .get(self.url("/v1/me/player/recently-played"))
            .query(&[("limit", limit)]);
        self.send(request, access_token).await
    }

    async fn play(&self, access_token: &str, command: &PlayCommand) -> Result<ProviderResponse> {
        let request = self
            .client
            .put(self.url("/v1/me/player/play"))
            .json(command);
        self.send(request, access_token).await
    }
}
