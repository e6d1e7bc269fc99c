use std::{cmp::Ordering, sync::Arc};

use crate::{
    catalog::Catalog,
    error::AppResult,
    models::TrackRecord,
    services::catalog_lookup::CatalogLookup,
};

/// Most similar songs considered per query
pub const MAX_CANDIDATES: usize = 20;

/// A similar song with the poster shown for it
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Index position in the catalog
    pub position: usize,
    pub track: TrackRecord,
    pub score: f64,
    pub poster_url: String,
}

/// The resolved query track and its candidates, most similar first
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub anchor: TrackRecord,
    pub candidates: Vec<RankedCandidate>,
}

impl Ranking {
    pub fn names(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.track.song.clone()).collect()
    }

    pub fn posters(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.poster_url.clone()).collect()
    }
}

/// Ranks catalog songs by precomputed similarity to a query song
#[derive(Clone)]
pub struct Ranker {
    catalog: Arc<Catalog>,
    lookup: CatalogLookup,
}

impl Ranker {
    pub fn new(catalog: Arc<Catalog>, lookup: CatalogLookup) -> Self {
        Self { catalog, lookup }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn lookup(&self) -> &CatalogLookup {
        &self.lookup
    }

    /// Positions and scores of the songs most similar to `anchor`.
    ///
    /// The row is stably sorted by descending score, the top entry (the
    /// anchor itself) is dropped, at most [`MAX_CANDIDATES`] follow, and
    /// any of those sharing the anchor's title are removed.
    pub fn similar_positions(&self, anchor: usize) -> Vec<(usize, f64)> {
        let (Some(row), Some(anchor_track)) =
            (self.catalog.similarity_row(anchor), self.catalog.track(anchor))
        else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .skip(1)
            .take(MAX_CANDIDATES)
            .filter(|(position, _)| {
                self.catalog
                    .track(*position)
                    .is_some_and(|track| track.song != anchor_track.song)
            })
            .collect()
    }

    /// Up to [`MAX_CANDIDATES`] songs similar to the query, with posters.
    ///
    /// Fails with `NotFound` when the song is not in the catalog. Poster
    /// lookups that fail fall back to the placeholder.
    pub async fn rank(&self, song: &str, artist: Option<&str>) -> AppResult<Ranking> {
        let anchor = self.catalog.position_of(song, artist)?;
        let anchor_track = self.catalog.tracks()[anchor].clone();

        let mut candidates = Vec::with_capacity(MAX_CANDIDATES);
        for (position, score) in self.similar_positions(anchor) {
            let track = self.catalog.tracks()[position].clone();
            let poster_url = self.lookup.poster_url_or_placeholder(&track).await;
            candidates.push(RankedCandidate {
                position,
                track,
                score,
                poster_url,
            });
        }

        tracing::debug!(
            song = %anchor_track.song,
            artist = %anchor_track.artist,
            anchor,
            candidates = candidates.len(),
            "Ranked similar songs"
        );

        Ok(Ranking {
            anchor: anchor_track,
            candidates,
        })
    }
}
