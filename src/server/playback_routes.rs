use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use super::state::{GuardedRelay, ServerState};
use crate::credentials::{Identity, IdentityParams};
use crate::error::RelayError;
use crate::playback::PlaybackEnvelope;

#[derive(Serialize, Debug, PartialEq)]
struct PlayResponse {
    status_code: u16,
}

async fn get_me(
    State(relay): State<GuardedRelay>,
    Query(params): Query<IdentityParams>,
) -> Result<Json<serde_json::Value>, RelayError> {
    let identity = Identity::try_from(params)?;
    Ok(Json(relay.get_me(identity).await?))
}

async fn get_playback(
    State(relay): State<GuardedRelay>,
    Query(params): Query<IdentityParams>,
) -> Result<Json<PlaybackEnvelope>, RelayError> {
    let identity = Identity::try_from(params)?;
    let spotify_playback = relay.get_playback(identity).await?;
    Ok(Json(PlaybackEnvelope { spotify_playback }))
}

async fn update_playback(
    State(relay): State<GuardedRelay>,
    Path(user_id): Path<String>,
    body: Result<Json<PlaybackEnvelope>, JsonRejection>,
) -> Result<Json<PlayResponse>, RelayError> {
    let Json(envelope) = body.map_err(|e| RelayError::Validation(e.body_text()))?;
    let record = envelope
        .spotify_playback
        .ok_or_else(|| RelayError::Validation("spotify_playback is missing".to_string()))?;
    debug!("Updating playback of {} to {:?}", user_id, record.spotify_uri);

    let status_code = relay.update_playback(&user_id, &record).await?;
    Ok(Json(PlayResponse { status_code }))
}

async fn transfer_playback(
    State(relay): State<GuardedRelay>,
    Path((from_user_id, to_user_id)): Path<(String, String)>,
) -> Result<Json<PlayResponse>, RelayError> {
    let status_code = relay
        .transfer_playback(&from_user_id, &to_user_id)
        .await?;
    Ok(Json(PlayResponse { status_code }))
}

pub fn make_playback_routes(state: ServerState) -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/playback", get(get_playback))
        .route("/playback/update/{user_id}", post(update_playback))
        .route(
            "/playback/transfer/{from_user_id}/{to_user_id}",
            post(transfer_playback),
        )
        .with_state(state)
}
