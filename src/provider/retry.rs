use std::future::Future;
use tracing::info;

use super::ProviderResponse;
use crate::auth::TokenRefresh;
use crate::credentials::Credentials;
use crate::error::RelayError;

/// Runs `request_fn` with the current access token and, on a 401, refreshes
/// the token and runs it exactly once more. The second response is returned
/// whatever its status.
///
/// The refreshed token is written into `credentials` so later calls in the
/// same request use it.
pub async fn call_with_refresh<F, Fut>(
    request_fn: F,
    credentials: &mut Credentials,
    refresh: &TokenRefresh,
) -> Result<ProviderResponse, RelayError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = anyhow::Result<ProviderResponse>>,
{
    let response = send(&request_fn, &credentials.access_token).await?;
    if !response.is_unauthorized() {
        return Ok(response);
    }

    info!(
        "Provider rejected access token for user {:?}, refreshing",
        credentials.user_id
    );
    credentials.access_token = refresh
        .refresh(&credentials.refresh_token, credentials.user_id.as_deref())
        .await?;

    send(&request_fn, &credentials.access_token).await
}

async fn send<F, Fut>(request_fn: &F, access_token: &str) -> Result<ProviderResponse, RelayError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = anyhow::Result<ProviderResponse>>,
{
    request_fn(access_token.to_string())
        .await
        .map_err(|e| RelayError::Upstream {
            status: None,
            message: format!("{:#}", e),
        })
}
