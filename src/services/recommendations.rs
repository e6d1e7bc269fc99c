use crate::{
    error::{AppError, AppResult},
    models::{ContextFilters, RecommendationRequest, RecommendationResponse},
    services::context_filter::ContextFilter,
};

/// Generates context-aware song recommendations
///
/// Resolves the requested song in the catalog, ranks its most similar songs
/// and narrows them to the requested mood, activity and genre. Unknown
/// filter values behave as `Any`; only an unknown song is an error.
pub async fn get_recommendations(
    filter: &ContextFilter,
    request: RecommendationRequest,
) -> AppResult<RecommendationResponse> {
    if request.song.trim().is_empty() {
        return Err(AppError::InvalidInput("Song cannot be empty".to_string()));
    }

    let artist = request
        .artist
        .as_deref()
        .map(str::trim)
        .filter(|artist| !artist.is_empty());

    let filters = ContextFilters::from_labels(
        request.mood.as_deref(),
        request.activity.as_deref(),
        request.genre.as_deref(),
    );

    let ranking = filter.recommend(&request.song, artist, &filters).await?;

    Ok(RecommendationResponse {
        names: ranking.names(),
        posters: ranking.posters(),
        song: ranking.anchor.song,
        artist: ranking.anchor.artist,
        mood: filters.mood,
        activity: filters.activity,
        genre: filters.genre.to_string(),
    })
}
