use std::sync::Arc;

use crate::{
    error::AppError,
    models::{AudioFeatures, TrackRecord},
    services::providers::CatalogProvider,
};

/// Outcome of a best-effort catalog lookup
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    /// The provider answered but had nothing for this track
    Absent,
    /// The provider could not be reached or returned garbage
    Failed(AppError),
}

impl<T> Lookup<T> {
    fn from_result(result: Result<Option<T>, AppError>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::Absent,
            Err(e) => Lookup::Failed(e),
        }
    }

    /// Collapses absent and failed lookups into `None`
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent | Lookup::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }
}

/// Wraps a catalog provider so that no lookup error escapes to the caller.
///
/// Failures are logged and reported as [`Lookup::Failed`]; the
/// `*_or_default` helpers degrade them to placeholder, `None` or empty.
#[derive(Clone)]
pub struct CatalogLookup {
    provider: Arc<dyn CatalogProvider>,
    placeholder_poster_url: String,
}

impl CatalogLookup {
    pub fn new(provider: Arc<dyn CatalogProvider>, placeholder_poster_url: String) -> Self {
        Self {
            provider,
            placeholder_poster_url,
        }
    }

    pub fn placeholder_poster_url(&self) -> &str {
        &self.placeholder_poster_url
    }

    pub async fn poster_url(&self, track: &TrackRecord) -> Lookup<String> {
        let lookup = Lookup::from_result(self.provider.poster_url(track).await);
        self.log_failure(&lookup, track, "album cover");
        lookup
    }

    pub async fn audio_features(&self, track: &TrackRecord) -> Lookup<AudioFeatures> {
        let lookup = Lookup::from_result(self.provider.audio_features(track).await);
        self.log_failure(&lookup, track, "audio features");
        lookup
    }

    pub async fn genres(&self, track: &TrackRecord) -> Lookup<Vec<String>> {
        let result = self.provider.genres(track).await.map(|genres| {
            if genres.is_empty() {
                None
            } else {
                Some(genres)
            }
        });
        let lookup = Lookup::from_result(result);
        self.log_failure(&lookup, track, "genres");
        lookup
    }

    /// Poster URL, or the configured placeholder when none could be resolved
    pub async fn poster_url_or_placeholder(&self, track: &TrackRecord) -> String {
        self.poster_url(track)
            .await
            .found()
            .unwrap_or_else(|| self.placeholder_poster_url.clone())
    }

    pub async fn genres_or_empty(&self, track: &TrackRecord) -> Vec<String> {
        self.genres(track).await.found().unwrap_or_default()
    }

    fn log_failure<T>(&self, lookup: &Lookup<T>, track: &TrackRecord, what: &'static str) {
        if let Lookup::Failed(e) = lookup {
            tracing::warn!(
                song = %track.song,
                artist = %track.artist,
                provider = self.provider.name(),
                lookup = what,
                error = %e,
                "Catalog lookup failed"
            );
        }
    }
}
