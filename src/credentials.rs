//! Turning a caller-supplied identity into usable provider credentials.

use serde::Deserialize;
use tracing::debug;

use crate::error::RelayError;
use crate::profile::ProfileService;

/// Raw identity fields as they arrive on the query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IdentityParams {
    pub id: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// Tokens must be looked up on the user's profile.
    UserId(String),
    /// Tokens supplied by the caller; the user id, when given, is only used
    /// to persist refreshed tokens.
    Tokens {
        user_id: Option<String>,
        access_token: String,
        refresh_token: String,
    },
}

impl Identity {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Identity::UserId(user_id.into())
    }
}

impl TryFrom<IdentityParams> for Identity {
    type Error = RelayError;

    fn try_from(params: IdentityParams) -> Result<Self, Self::Error> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        let user_id = non_empty(params.id);

        match (
            non_empty(params.access_token),
            non_empty(params.refresh_token),
            user_id,
        ) {
            (Some(access_token), Some(refresh_token), user_id) => Ok(Identity::Tokens {
                user_id,
                access_token,
                refresh_token,
            }),
            (_, _, Some(user_id)) => Ok(Identity::UserId(user_id)),
            _ => Err(RelayError::Validation(
                "request must include either a user id or both access and refresh tokens"
                    .to_string(),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

/// Resolves an identity, hitting the user-profile service exactly once when
/// the caller did not supply both tokens.
pub async fn resolve(
    identity: Identity,
    profile: &dyn ProfileService,
) -> Result<Credentials, RelayError> {
    match identity {
        Identity::Tokens {
            user_id,
            access_token,
            refresh_token,
        } => Ok(Credentials {
            user_id,
            access_token,
            refresh_token,
        }),
        Identity::UserId(user_id) => {
            debug!("Looking up stored tokens for user {}", user_id);
            let record = profile
                .get_user(&user_id)
                .await
                .map_err(|e| RelayError::Lookup(format!("{:#}", e)))?;

            let access_token = record.spotify_access_token.ok_or_else(|| {
                RelayError::Lookup(format!("user {} has no spotify_access_token", user_id))
            })?;
            let refresh_token = record.spotify_refresh_token.ok_or_else(|| {
                RelayError::Lookup(format!("user {} has no spotify_refresh_token", user_id))
            })?;

            Ok(Credentials {
                user_id: Some(user_id),
                access_token,
                refresh_token,
            })
        }
    }
}
