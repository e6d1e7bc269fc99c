use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Spotify application client ID (client credentials flow)
    pub spotify_client_id: String,

    /// Spotify application client secret
    pub spotify_client_secret: String,

    /// Spotify Web API base URL
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,

    /// Spotify accounts token endpoint
    #[serde(default = "default_spotify_auth_url")]
    pub spotify_auth_url: String,

    /// JSON file with the track records, in similarity index order
    #[serde(default = "default_songs_path")]
    pub songs_path: String,

    /// JSON file with the N×N similarity matrix
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Poster returned when album art cannot be resolved
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_spotify_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_spotify_auth_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_songs_path() -> String {
    "data/songs.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_placeholder_poster_url() -> String {
    "spotify_logo.webp".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
