use serde::{Deserialize, Serialize};
use std::fmt::Display;

mod context;

pub use context::{Activity, ContextFilters, GenreFilter, Mood};

/// One row of the similarity index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TrackRecord {
    pub song: String,
    pub artist: String,
}

impl TrackRecord {
    pub fn new(song: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            song: song.into(),
            artist: artist.into(),
        }
    }
}

impl Display for TrackRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.song, self.artist)
    }
}

/// Audio feature scalars for a track, any of which may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioFeatures {
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub acousticness: Option<f64>,
}

/// Request for context-filtered recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub song: String,
    /// Disambiguates songs sharing a title; first match wins when omitted
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Up to five recommended songs with their posters, index-aligned
#[derive(Debug, Serialize, PartialEq)]
pub struct RecommendationResponse {
    pub song: String,
    pub artist: String,
    pub mood: Mood,
    pub activity: Activity,
    pub genre: String,
    pub names: Vec<String>,
    pub posters: Vec<String>,
}

/// Selectable filter values
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub moods: Vec<Mood>,
    pub activities: Vec<Activity>,
    pub genres: Vec<&'static str>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            moods: Mood::ALL.to_vec(),
            activities: Activity::ALL.to_vec(),
            genres: GenreFilter::SUGGESTED.to_vec(),
        }
    }
}

// ============================================================================
// Spotify Web API Types
// ============================================================================

/// Client credentials token response
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Response from GET /search?type=track
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: SpotifyTrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrackPage {
    #[serde(default)]
    pub items: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub album: SpotifyAlbum,
    #[serde(default)]
    pub artists: Vec<SpotifyArtistRef>,
}

impl SpotifyTrack {
    /// First album image, the largest one Spotify returns
    pub fn poster_url(&self) -> Option<&str> {
        self.album.images.first().map(|image| image.url.as_str())
    }

    pub fn primary_artist_id(&self) -> Option<&str> {
        self.artists.first().and_then(|artist| artist.id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Response from GET /artists/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}
