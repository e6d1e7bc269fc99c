use axum::Json;

use crate::models::FilterOptions;

/// Handler listing the moods, activities and suggested genres
pub async fn options() -> Json<FilterOptions> {
    Json(FilterOptions::default())
}
