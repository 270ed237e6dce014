//! Provider payload shapes and the canonical playback record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A "currently playing" response, or a single "recently played" entry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPlayback {
    /// Present (possibly null) on "currently playing" payloads.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub item: Option<Option<RawItem>>,
    /// Present on "recently played" entries.
    #[serde(default)]
    pub track: Option<RawItem>,
    #[serde(default)]
    pub is_playing: Option<bool>,
    #[serde(default)]
    pub progress_ms: Option<i64>,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

/// A track or a podcast episode.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawItem {
    pub id: Option<String>,
    pub uri: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<RawArtist>>,
    #[serde(default)]
    pub show: Option<RawShow>,
    pub duration_ms: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawArtist {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawShow {
    pub publisher: Option<String>,
}

/// Page returned by the recently-played endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecentlyPlayedPage {
    #[serde(default)]
    pub items: Vec<RawPlayback>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackRecord {
    pub id: Option<String>,
    pub spotify_uri: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub is_playing: bool,
    pub is_active: bool,
    pub progress_ms: Option<i64>,
    pub duration_ms: Option<i64>,
    pub played_at: Option<DateTime<Utc>>,
}

/// Body exchanged with clients and persisted on the user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackEnvelope {
    pub spotify_playback: Option<PlaybackRecord>,
}

/// Body of the provider's "start/resume playback" call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayCommand {
    pub uris: Vec<String>,
    pub position_ms: i64,
}

/// Distinguishes a missing key (`None`) from an explicit null (`Some(None)`).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
