//! HTTP client for the user-profile service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{ProfileService, TokenUpdate, UserRecord};
use crate::config::RelayConfig;
use crate::playback::PlaybackRecord;

pub struct HttpProfileService {
    client: Client,
    config: RelayConfig,
}

impl HttpProfileService {
    pub fn new(config: RelayConfig, timeout_sec: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn get_user(&self, user_id: &str) -> Result<UserRecord> {
        let url = self.config.users_endpoint("getUser");
        debug!("Fetching user {} from {}", user_id, url);
        let response = self
            .client
            .get(&url)
            .query(&[("id", user_id)])
            .send()
            .await
            .context("Failed to reach user-profile service")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch user {}: status {}",
                user_id,
                response.status()
            );
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse user record for {}", user_id))
    }

    async fn update_tokens(&self, user_id: &str, update: &TokenUpdate) -> Result<()> {
        let url = self.config.users_endpoint("updateUser");
        let response = self
            .client
            .put(&url)
            .query(&[("id", user_id)])
            .form(update)
            .send()
            .await
            .context("Failed to reach user-profile service")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to store tokens for user {}: status {}",
                user_id,
                response.status()
            );
        }
        Ok(())
    }

    async fn update_playback(
        &self,
        user_id: &str,
        playback: Option<&PlaybackRecord>,
    ) -> Result<()> {
        let url = self.config.users_endpoint("updateUser");
        let response = self
            .client
            .post(&url)
            .query(&[("id", user_id)])
            .json(&json!({ "spotify_playback": playback }))
            .send()
            .await
            .context("Failed to reach user-profile service")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to store playback for user {}: status {}",
                user_id,
                response.status()
            );
        }
        Ok(())
    }
}
