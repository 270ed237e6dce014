//! Exchange of refresh tokens for fresh provider access tokens.

mod client;
mod refresh;

pub use client::HttpAuthClient;
pub use refresh::TokenRefresh;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    /// Only present when the auth service rotated the refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair>;
}
