use crate::{
    error::AppResult,
    models::ContextFilters,
    services::ranker::{RankedCandidate, Ranker, Ranking},
};

/// Most recommendations returned per request
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Narrows ranked candidates to those matching the listener's context.
///
/// Filters are a preference, not a guarantee: when too few candidates
/// match, the remaining slots are filled from the unfiltered ranking.
#[derive(Clone)]
pub struct ContextFilter {
    ranker: Ranker,
}

impl ContextFilter {
    pub fn new(ranker: Ranker) -> Self {
        Self { ranker }
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// At most [`MAX_RECOMMENDATIONS`] songs similar to the query.
    ///
    /// Only fails when the query song is not in the catalog.
    pub async fn recommend(
        &self,
        song: &str,
        artist: Option<&str>,
        filters: &ContextFilters,
    ) -> AppResult<Ranking> {
        let ranking = self.ranker.rank(song, artist).await?;
        let candidates = &ranking.candidates;

        let mut accepted: Vec<usize> = Vec::with_capacity(MAX_RECOMMENDATIONS);
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.track.song == song {
                continue;
            }
            if self.matches_context(candidate, filters).await {
                accepted.push(i);
                if accepted.len() == MAX_RECOMMENDATIONS {
                    break;
                }
            }
        }
        let matched = accepted.len();

        if accepted.len() < MAX_RECOMMENDATIONS {
            for (i, candidate) in candidates.iter().enumerate() {
                if accepted.len() == MAX_RECOMMENDATIONS {
                    break;
                }
                if candidate.track.song == song || accepted.contains(&i) {
                    continue;
                }
                accepted.push(i);
            }
        }

        let recommendations: Vec<RankedCandidate> = if accepted.is_empty() {
            candidates.iter().take(MAX_RECOMMENDATIONS).cloned().collect()
        } else {
            accepted.iter().map(|&i| candidates[i].clone()).collect()
        };

        tracing::info!(
            song = %ranking.anchor.song,
            artist = %ranking.anchor.artist,
            mood = %filters.mood,
            activity = %filters.activity,
            genre = %filters.genre,
            candidates = candidates.len(),
            matched,
            returned = recommendations.len(),
            "Context filtering completed"
        );

        Ok(Ranking {
            anchor: ranking.anchor,
            candidates: recommendations,
        })
    }

    /// Strict check of one candidate against every active filter.
    ///
    /// A candidate without audio features never matches.
    async fn matches_context(&self, candidate: &RankedCandidate, filters: &ContextFilters) -> bool {
        let lookup = self.ranker.lookup();

        let Some(features) = lookup.audio_features(&candidate.track).await.found() else {
            tracing::debug!(song = %candidate.track.song, "No audio features, skipping candidate");
            return false;
        };

        if !filters.admits_features(&features) {
            return false;
        }

        if filters.genre.is_active() {
            let genres = lookup.genres_or_empty(&candidate.track).await;
            return filters.genre.admits(&genres);
        }

        true
    }
}
