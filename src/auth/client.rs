//! HTTP client for the internal auth service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{TokenPair, TokenRefresher};
use crate::config::RelayConfig;

pub struct HttpAuthClient {
    client: Client,
    refresh_url: String,
}

impl HttpAuthClient {
    pub fn new(config: &RelayConfig, timeout_sec: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            refresh_url: config.refresh_token_endpoint(),
        })
    }

    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }
}

#[async_trait]
impl TokenRefresher for HttpAuthClient {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let response = self
            .client
            .get(&self.refresh_url)
            .query(&[("refresh_token", refresh_token)])
            .send()
            .await
            .context("Failed to reach auth service")?;

        if !response.status().is_success() {
            anyhow::bail!("Auth service responded with status {}", response.status());
        }

        let tokens: TokenPair = response
            .json()
            .await
            .context("Failed to parse refresh response")?;

        if tokens.access_token.is_empty() {
            anyhow::bail!("Auth service returned an empty access token");
        }
        Ok(tokens)
    }
}
