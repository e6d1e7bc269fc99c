use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use encore_api::{
    catalog::load_catalog,
    config::Config,
    routes::{create_router, AppState},
    services::providers::SpotifyProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Catalog and similarity index stay read-only for the process lifetime
    let catalog = load_catalog(&config.songs_path, &config.similarity_path)?;

    let provider = SpotifyProvider::new(
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
        config.spotify_api_url.clone(),
        config.spotify_auth_url.clone(),
    );

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(provider),
        config.placeholder_poster_url.clone(),
    );
    let app = create_router(Arc::new(state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
