/// Spotify Web API provider
///
/// Authenticates with the client credentials flow and resolves every lookup
/// through a track search for `track:{song} artist:{artist}`.
///
/// API Flow:
/// 1. Token: POST {auth_url} with basic auth → bearer token
/// 2. Search: /search?type=track&limit=1 → track ID, album art, artist IDs
/// 3. Features: /audio-features/{track_id}
/// 4. Genres: /artists/{artist_id}
use crate::{
    error::{AppError, AppResult},
    models::{
        AudioFeatures, SpotifyArtist, SpotifySearchResponse, SpotifyToken, SpotifyTrack,
        TrackRecord,
    },
    services::providers::CatalogProvider,
};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Tokens are renewed this long before Spotify says they expire
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn from_response(token: SpotifyToken, now: DateTime<Utc>) -> Self {
        let lifetime = (token.expires_in - TOKEN_REFRESH_MARGIN_SECS).max(0);
        Self {
            value: token.access_token,
            expires_at: now + Duration::seconds(lifetime),
        }
    }

    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Clone)]
pub struct SpotifyProvider {
    http_client: HttpClient,
    client_id: String,
    client_secret: String,
    api_url: String,
    auth_url: String,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl SpotifyProvider {
    pub fn new(
        client_id: String,
        client_secret: String,
        api_url: String,
        auth_url: String,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            client_id,
            client_secret,
            api_url,
            auth_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Search query narrowing the match to one song by one artist
    fn search_query(track: &TrackRecord) -> String {
        format!("track:{} artist:{}", track.song, track.artist)
    }

    /// Returns a cached bearer token, fetching a new one when expired
    async fn access_token(&self) -> AppResult<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_valid_at(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut guard = self.token.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = guard.as_ref() {
            if token.is_valid_at(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http_client
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: SpotifyToken = Self::check_status(response).await?.json().await?;
        let token = AccessToken::from_response(token, Utc::now());

        tracing::debug!(expires_at = %token.expires_at, "Obtained Spotify access token");

        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn check_status(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "Spotify API returned status {}: {}",
            status, body
        )))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let response_text = Self::check_status(response).await?.text().await?;
        tracing::debug!(path = %path, response = %response_text, "Raw Spotify API response");

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse Spotify response for {}: {}", path, e))
        })
    }

    /// Top search hit for the track, if Spotify knows it
    async fn search_track(&self, track: &TrackRecord) -> AppResult<Option<SpotifyTrack>> {
        let query = Self::search_query(track);
        let response: SpotifySearchResponse = self
            .get_json("/search", &[("q", query.as_str()), ("type", "track"), ("limit", "1")])
            .await?;

        Ok(response.tracks.items.into_iter().next())
    }
}

#[async_trait::async_trait]
impl CatalogProvider for SpotifyProvider {
    async fn poster_url(&self, track: &TrackRecord) -> AppResult<Option<String>> {
        let hit = self.search_track(track).await?;
        Ok(hit.and_then(|hit| hit.poster_url().map(str::to_string)))
    }

    async fn audio_features(&self, track: &TrackRecord) -> AppResult<Option<AudioFeatures>> {
        let Some(track_id) = self.search_track(track).await?.and_then(|hit| hit.id) else {
            return Ok(None);
        };

        // Spotify answers `null` for tracks it has no analysis for
        self.get_json::<Option<AudioFeatures>>(&format!("/audio-features/{}", track_id), &[])
            .await
    }

    async fn genres(&self, track: &TrackRecord) -> AppResult<Vec<String>> {
        let hit = self.search_track(track).await?;
        let Some(artist_id) = hit.as_ref().and_then(|hit| hit.primary_artist_id()) else {
            return Ok(Vec::new());
        };

        let artist: SpotifyArtist = self
            .get_json(&format!("/artists/{}", artist_id), &[])
            .await?;

        Ok(artist.genres.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "spotify"
    }
}
