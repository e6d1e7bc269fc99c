use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use tower_http::request_id::RequestId;

use crate::{
    error::AppResult,
    middleware::request_id::request_id_str,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id_str(&request_id),
        song = %request.song,
        artist = ?request.artist,
        mood = ?request.mood,
        activity = ?request.activity,
        genre = ?request.genre,
        "Processing recommendation request"
    );

    let response = recommendations::get_recommendations(&state.recommender, request).await?;

    tracing::info!(
        request_id = %request_id_str(&request_id),
        returned = response.names.len(),
        "Recommendations completed"
    );

    Ok(Json(response))
}
