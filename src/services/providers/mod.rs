/// Music catalog provider abstraction
///
/// A provider resolves album art, audio features and genres for a
/// `(song, artist)` pair from a third-party catalog. Providers report
/// failures as errors; `services::catalog_lookup` turns them into
/// recoverable lookup outcomes.
use crate::{
    error::AppResult,
    models::{AudioFeatures, TrackRecord},
};

pub mod spotify;

pub use spotify::SpotifyProvider;

/// Trait for third-party music catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Album art URL of the best matching track, `None` when it has no art
    async fn poster_url(&self, track: &TrackRecord) -> AppResult<Option<String>>;

    /// Audio features of the best matching track
    async fn audio_features(&self, track: &TrackRecord) -> AppResult<Option<AudioFeatures>>;

    /// Genre labels of the track's primary artist
    async fn genres(&self, track: &TrackRecord) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
