//! Conversion of provider payloads into [`PlaybackRecord`]s and back into
//! playback commands.

use super::models::{PlayCommand, PlaybackRecord, RawItem, RawPlayback};
use crate::error::RelayError;

/// Builds the canonical record for a payload, or `None` when nothing is
/// (or was recently) playing.
///
/// The `item` key wins whenever it is present, even if null; `track` is only
/// consulted on payloads without one.
pub fn normalize(raw: &RawPlayback) -> Option<PlaybackRecord> {
    let item = match &raw.item {
        Some(item) => item.as_ref(),
        None => raw.track.as_ref(),
    }?;

    Some(PlaybackRecord {
        id: item.id.clone(),
        spotify_uri: item.uri.clone(),
        track_name: item.name.clone(),
        artist_name: artist_name(item),
        is_playing: raw.is_playing.unwrap_or(false),
        is_active: raw.is_playing.is_some(),
        progress_ms: raw.progress_ms,
        duration_ms: item.duration_ms,
        played_at: raw.played_at,
    })
}

fn artist_name(item: &RawItem) -> Option<String> {
    match &item.artists {
        Some(artists) => Some(
            artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        None => item.show.as_ref().and_then(|show| show.publisher.clone()),
    }
}

/// The provider rejects negative seek positions.
pub fn clamp_progress(progress_ms: i64) -> i64 {
    progress_ms.max(0)
}

impl PlayCommand {
    pub fn from_record(record: &PlaybackRecord) -> Result<Self, RelayError> {
        let uri = record
            .spotify_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| RelayError::Validation("playback has no spotify_uri".to_string()))?;

        Ok(Self {
            uris: vec![uri.to_string()],
            position_ms: clamp_progress(record.progress_ms.unwrap_or(0)),
        })
    }
}
