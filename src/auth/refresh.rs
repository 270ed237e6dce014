use std::sync::Arc;
use tracing::{debug, info, warn};

use super::TokenRefresher;
use crate::error::RelayError;
use crate::profile::{ProfileService, TokenUpdate};

/// Refreshes access tokens and writes the result back to the user's profile.
#[derive(Clone)]
pub struct TokenRefresh {
    refresher: Arc<dyn TokenRefresher>,
    profile: Arc<dyn ProfileService>,
}

impl TokenRefresh {
    pub fn new(refresher: Arc<dyn TokenRefresher>, profile: Arc<dyn ProfileService>) -> Self {
        Self { refresher, profile }
    }

    /// Returns the new access token. When `user_id` is known the new tokens
    /// are persisted; a failed write is logged and otherwise ignored.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        user_id: Option<&str>,
    ) -> Result<String, RelayError> {
        debug!("Refreshing access token for user {:?}", user_id);
        let tokens = self
            .refresher
            .refresh(refresh_token)
            .await
            .map_err(|e| RelayError::Refresh(format!("{:#}", e)))?;

        if let Some(user_id) = user_id {
            let update = TokenUpdate {
                spotify_access_token: tokens.access_token.clone(),
                spotify_refresh_token: tokens.refresh_token.clone(),
            };
            match self.profile.update_tokens(user_id, &update).await {
                Ok(()) => info!("Stored refreshed tokens for user {}", user_id),
                Err(e) => warn!(
                    "Failed to store refreshed tokens for user {}: {:#}",
                    user_id, e
                ),
            }
        }

        Ok(tokens.access_token)
    }
}
