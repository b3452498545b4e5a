//! Spotify Web API implementation of `PlaybackClient`
//!
//! All player endpoints target the account's currently active device.
//! The access token is short-lived; the command loop refreshes it once
//! per turn via `refresh_access_token` before dispatching.

use crate::core::error::{DjError, Result};
use crate::playback::{PlaybackClient, PlaybackState, Track};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use std::sync::RwLock;

const API_BASE: &str = "https://api.spotify.com";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// reqwest-backed Spotify client
///
/// Holds the OAuth refresh token plus the latest access token; the access
/// token starts empty and is populated by `refresh_access_token`.
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    access_token: RwLock<Option<String>>,
}

impl SpotifyClient {
    /// Create a new client with explicit credentials
    pub fn new(client_id: String, client_secret: String, refresh_token: String) -> Self {
        Self {
            client: Client::new(),
            client_id,
            client_secret,
            refresh_token,
            access_token: RwLock::new(None),
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET, SPOTIFY_REFRESH_TOKEN
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| DjError::MissingConfig("SPOTIFY_CLIENT_ID not set".into()))?;
        let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| DjError::MissingConfig("SPOTIFY_CLIENT_SECRET not set".into()))?;
        let refresh_token = std::env::var("SPOTIFY_REFRESH_TOKEN")
            .map_err(|_| DjError::MissingConfig("SPOTIFY_REFRESH_TOKEN not set".into()))?;

        Ok(Self::new(client_id, client_secret, refresh_token))
    }

    fn bearer_token(&self) -> Result<String> {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or_else(|| {
                DjError::PlaybackError("no access token; refresh_access_token first".into())
            })
    }

    /// Issue a player request where only the status code matters
    async fn player_command(&self, method: Method, path: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .request(method, format!("{}{}", API_BASE, path))
            .bearer_auth(token)
            .header("content-length", 0)
            .send()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }
}

/// Surface non-2xx responses with whatever body the API returned
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await.unwrap_or_default();
    Err(DjError::PlaybackError(format!(
        "API error ({}): {}",
        status, error_text
    )))
}

#[async_trait]
impl PlaybackClient for SpotifyClient {
    async fn play(&self) -> Result<()> {
        self.player_command(Method::PUT, "/v1/me/player/play").await
    }

    async fn pause(&self) -> Result<()> {
        self.player_command(Method::PUT, "/v1/me/player/pause").await
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(format!("{}/v1/search", API_BASE))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "10")])
            .send()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        let body: SearchResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        Ok(body.tracks.items)
    }

    async fn add_to_queue(&self, uri: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .post(format!("{}/v1/me/player/queue", API_BASE))
            .bearer_auth(token)
            .query(&[("uri", uri)])
            .header("content-length", 0)
            .send()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    async fn current_playback(&self) -> Result<PlaybackState> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(format!("{}/v1/me/player", API_BASE))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        // 204 means no active device; treat as not playing
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(PlaybackState::default());
        }

        check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))
    }

    async fn queue(&self) -> Result<Vec<Track>> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(format!("{}/v1/me/player/queue", API_BASE))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        let body: QueueResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        Ok(body.queue)
    }

    async fn skip_to_next(&self) -> Result<()> {
        self.player_command(Method::POST, "/v1/me/player/next").await
    }

    async fn refresh_access_token(&self) -> Result<String> {
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        let body: TokenResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DjError::PlaybackError(e.to_string()))?;

        if let Ok(mut guard) = self.access_token.write() {
            *guard = Some(body.access_token.clone());
        }
        tracing::debug!("access token refreshed");

        Ok(body.access_token)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Deserialize)]
struct TrackPage {
    items: Vec<Track>,
}

#[derive(Deserialize)]
struct QueueResponse {
    #[serde(default)]
    queue: Vec<Track>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}
