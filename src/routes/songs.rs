use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{models::TrackRecord, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct SongQuery {
    /// Case-insensitive substring of the song title
    #[serde(default)]
    q: Option<String>,
}

/// Handler listing selectable songs in catalog order
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SongQuery>,
) -> Json<Vec<TrackRecord>> {
    let needle = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let songs = state
        .catalog
        .tracks()
        .iter()
        .filter(|track| {
            needle
                .as_ref()
                .map_or(true, |needle| track.song.to_lowercase().contains(needle))
        })
        .cloned()
        .collect();

    Json(songs)
}
