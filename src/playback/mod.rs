//! Playback capability interface and the remote streaming-service client
//!
//! The intent pipeline only ever talks to `PlaybackClient`. The concrete
//! Spotify implementation lives in `spotify`; tests substitute fakes.

pub mod spotify;

use crate::core::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

pub use spotify::SpotifyClient;

/// A single track as returned by search or the queue endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

impl Track {
    /// The first credited artist, for status lines
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("unknown artist")
    }
}

/// Transient device state, fetched fresh before each play decision
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
}

/// Capability interface over the remote streaming account
///
/// One method per remote operation the pipeline needs; every call is a
/// single round trip with no retry layer.
#[async_trait]
pub trait PlaybackClient: Send + Sync {
    /// Resume or start playback on the active device
    async fn play(&self) -> Result<()>;

    /// Pause playback on the active device
    async fn pause(&self) -> Result<()>;

    /// Search tracks by free-text query, best matches first
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;

    /// Append a track to the playback queue by URI
    async fn add_to_queue(&self, uri: &str) -> Result<()>;

    /// Fetch the current playback state
    async fn current_playback(&self) -> Result<PlaybackState>;

    /// Fetch a snapshot of the upcoming queue, in play order
    async fn queue(&self) -> Result<Vec<Track>>;

    /// Skip to the next track
    async fn skip_to_next(&self) -> Result<()>;

    /// Exchange the refresh token for a fresh access token
    async fn refresh_access_token(&self) -> Result<String>;
}
