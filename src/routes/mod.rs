use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    catalog::Catalog,
    middleware::request_id::{
        make_span_with_request_id, propagate_request_id_layer, set_request_id_layer,
    },
    services::{providers::CatalogProvider, CatalogLookup, ContextFilter, Ranker},
};

pub mod filters;
pub mod recommendations;
pub mod songs;

/// Shared application state, read-only after startup
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: ContextFilter,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        provider: Arc<dyn CatalogProvider>,
        placeholder_poster_url: String,
    ) -> Self {
        let lookup = CatalogLookup::new(provider, placeholder_poster_url);
        let recommender = ContextFilter::new(Ranker::new(catalog.clone(), lookup));
        Self {
            catalog,
            recommender,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/songs", get(songs::list))
        .route("/filters", get(filters::options))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
