mod models;
mod normalize;

pub use models::{
    PlayCommand, PlaybackEnvelope, PlaybackRecord, RawArtist, RawItem, RawPlayback, RawShow,
    RecentlyPlayedPage,
};
pub use normalize::{clamp_progress, normalize};
