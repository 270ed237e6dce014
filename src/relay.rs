//! The relay's four operations, composed from credential resolution, the
//! refresh-and-retry wrapper and playback normalization.

use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{TokenRefresh, TokenRefresher};
use crate::credentials::{resolve, Credentials, Identity};
use crate::error::RelayError;
use crate::playback::{normalize, PlayCommand, PlaybackRecord, RawPlayback, RecentlyPlayedPage};
use crate::profile::ProfileService;
use crate::provider::{call_with_refresh, ProviderApi};

pub struct PlaybackRelay {
    profile: Arc<dyn ProfileService>,
    provider: Arc<dyn ProviderApi>,
    refresh: TokenRefresh,
    persist_playback: bool,
}

impl PlaybackRelay {
    pub fn new(
        profile: Arc<dyn ProfileService>,
        refresher: Arc<dyn TokenRefresher>,
        provider: Arc<dyn ProviderApi>,
        persist_playback: bool,
    ) -> Self {
        Self {
            refresh: TokenRefresh::new(refresher, profile.clone()),
            profile,
            provider,
            persist_playback,
        }
    }

    /// The provider's profile of the user behind `identity`.
    pub async fn get_me(&self, identity: Identity) -> Result<serde_json::Value, RelayError> {
        let mut credentials = resolve(identity, self.profile.as_ref()).await?;
        let provider = self.provider.as_ref();

        let response = call_with_refresh(
            move |token| async move { provider.current_user(&token).await },
            &mut credentials,
            &self.refresh,
        )
        .await?;

        if response.status != StatusCode::OK {
            return Err(response.into_error());
        }
        response.json()
    }

    /// What the user is playing, or last played when nothing is playing now.
    pub async fn get_playback(
        &self,
        identity: Identity,
    ) -> Result<Option<PlaybackRecord>, RelayError> {
        let mut credentials = resolve(identity, self.profile.as_ref()).await?;
        let provider = self.provider.as_ref();

        let response = call_with_refresh(
            move |token| async move { provider.currently_playing(&token).await },
            &mut credentials,
            &self.refresh,
        )
        .await?;

        let raw = match response.status {
            StatusCode::OK => Some(response.json::<RawPlayback>()?),
            StatusCode::NO_CONTENT => self.last_played(&mut credentials).await?,
            _ => return Err(response.into_error()),
        };
        let record = raw.as_ref().and_then(normalize);

        if let Some(user_id) = credentials.user_id.as_deref() {
            self.store_playback(user_id, record.as_ref()).await;
        }
        Ok(record)
    }

    async fn last_played(
        &self,
        credentials: &mut Credentials,
    ) -> Result<Option<RawPlayback>, RelayError> {
        debug!("Nothing currently playing, falling back to recently played");
        let provider = self.provider.as_ref();

        let response = call_with_refresh(
            move |token| async move { provider.recently_played(&token, 1).await },
            credentials,
            &self.refresh,
        )
        .await?;

        if response.status != StatusCode::OK {
            return Err(response.into_error());
        }
        let page: RecentlyPlayedPage = response.json()?;
        Ok(page.items.into_iter().next())
    }

    async fn store_playback(&self, user_id: &str, record: Option<&PlaybackRecord>) {
        if !self.persist_playback {
            return;
        }
        if let Err(e) = self.profile.update_playback(user_id, record).await {
            warn!("Failed to store playback for user {}: {:#}", user_id, e);
        }
    }

    /// Starts `record` on the user's active device. Returns the provider's
    /// success status.
    pub async fn update_playback(
        &self,
        user_id: &str,
        record: &PlaybackRecord,
    ) -> Result<u16, RelayError> {
        let command = PlayCommand::from_record(record)?;
        let mut credentials = resolve(Identity::for_user(user_id), self.profile.as_ref()).await?;
        let provider = self.provider.as_ref();
        let command = &command;

        let response = call_with_refresh(
            move |token| async move { provider.play(&token, command).await },
            &mut credentials,
            &self.refresh,
        )
        .await?;

        if !response.status.is_success() {
            return Err(response.into_error());
        }
        Ok(response.status.as_u16())
    }

    /// Replays `from_user_id`'s playback on `to_user_id`'s device.
    pub async fn transfer_playback(
        &self,
        from_user_id: &str,
        to_user_id: &str,
    ) -> Result<u16, RelayError> {
        let record = self
            .get_playback(Identity::for_user(from_user_id))
            .await?
            .ok_or_else(|| {
                RelayError::Validation(format!(
                    "user {} has no playback to transfer",
                    from_user_id
                ))
            })?;

        info!(
            "Transferring playback of {:?} from {} to {}",
            record.spotify_uri, from_user_id, to_user_id
        );
        self.update_playback(to_user_id, &record).await
    }
}
