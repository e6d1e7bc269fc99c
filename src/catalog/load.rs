use anyhow::Context;
use std::{fs, path::Path};

use super::{Catalog, SimilarityIndex};
use crate::models::TrackRecord;

/// Loads track records and the similarity matrix from JSON files.
///
/// `songs_path` holds an array of `{"song", "artist"}` objects in index
/// order; `similarity_path` holds an array of equally long score arrays.
pub fn load_catalog(songs_path: impl AsRef<Path>, similarity_path: impl AsRef<Path>) -> anyhow::Result<Catalog> {
    let songs_path = songs_path.as_ref();
    let similarity_path = similarity_path.as_ref();

    let songs = fs::read_to_string(songs_path)
        .with_context(|| format!("Failed to read songs file {}", songs_path.display()))?;
    let matrix = fs::read_to_string(similarity_path)
        .with_context(|| format!("Failed to read similarity file {}", similarity_path.display()))?;

    let catalog = parse_catalog(&songs, &matrix)?;

    tracing::info!(
        tracks = catalog.len(),
        songs_path = %songs_path.display(),
        similarity_path = %similarity_path.display(),
        "Loaded song catalog"
    );

    Ok(catalog)
}

/// Builds a catalog from the JSON text of both files
pub fn parse_catalog(songs_json: &str, similarity_json: &str) -> anyhow::Result<Catalog> {
    let tracks: Vec<TrackRecord> =
        serde_json::from_str(songs_json).context("Songs file is not a list of track records")?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(similarity_json)
        .context("Similarity file is not a matrix of numbers")?;

    let similarity = SimilarityIndex::from_rows(rows)?;
    Ok(Catalog::new(tracks, similarity)?)
}
